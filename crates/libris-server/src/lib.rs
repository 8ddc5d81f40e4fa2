//! # libris-server
//!
//! HTTP surface of the Libris catalog: axum routes, server-side sessions,
//! CSRF checks and JSON page views. The `libris` binary wraps it in a CLI.

pub mod auth;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod session;
pub mod state;
pub mod views;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::WebError;
pub use state::AppState;

use handlers::{account, books, reviews, search, users};

/// Build the router with every route and request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(books::index))
        .route("/register", get(account::register_form))
        .route("/create_account", post(account::create_account))
        .route("/login", get(account::login_form))
        .route("/logging_in", post(account::logging_in))
        .route("/logout", get(account::logout))
        .route("/add_book", get(books::add_book_form))
        .route("/add_book/upload", post(books::upload_book))
        .route("/search", get(search::search_form).post(search::search))
        .route("/books", get(books::list_books))
        .route("/book/{id}", get(books::book_detail))
        .route(
            "/book/{id}/edit",
            get(books::edit_book_form).post(books::edit_book),
        )
        .route(
            "/book/{id}/delete",
            get(books::delete_book_form).post(books::delete_book),
        )
        .route("/book/{id}/review", post(reviews::post_review))
        .route(
            "/book/{id}/review/edit",
            get(reviews::edit_review_form).post(reviews::edit_review),
        )
        .route("/book/{id}/review/delete", post(reviews::delete_review))
        .route("/user/{id}", get(users::profile))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
