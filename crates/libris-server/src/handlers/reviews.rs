//! Posting, editing and deleting the caller's own review of a book.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Form;
use serde::Deserialize;

use libris_core::errors::LibrisError;
use libris_core::tracing::events;
use libris_core::traits::ICatalogStorage;
use libris_core::validation;

use super::load_book;
use crate::auth::verify_csrf;
use crate::error::WebError;
use crate::session::AuthSession;
use crate::state::AppState;
use crate::views::{redirect, View};

#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    csrf_token: String,
    #[serde(default)]
    rating: String,
    comment: Option<String>,
}

impl ReviewForm {
    fn echo(&self, view: View, book_id: i64) -> View {
        view.with("book_id", book_id)
            .with("rating", &self.rating)
            .with("comment", &self.comment)
    }
}

const ALREADY_REVIEWED: &str = "You have already reviewed this book";

pub async fn post_review(
    State(state): State<AppState>,
    current: AuthSession,
    Path(book_id): Path<i64>,
    Form(form): Form<ReviewForm>,
) -> Result<Response, WebError> {
    let AuthSession { mut session, user } = current;
    verify_csrf(&session, &form.csrf_token, &format!("/book/{book_id}/review"))?;
    load_book(&state, book_id).await?;

    let draft = match validation::validate_review(&form.rating, form.comment.as_deref()) {
        Ok(draft) => draft,
        Err(e) => {
            return form
                .echo(View::form_error("review", e.to_string()), book_id)
                .render(&state, session)
                .await;
        }
    };

    let user_id = user.user_id;
    let rating = draft.rating;
    let inserted = state
        .blocking(move |storage| {
            if storage.get_review(book_id, user_id)?.is_some() {
                return Ok(false);
            }
            match storage.add_review(book_id, user_id, &draft) {
                Ok(_) => Ok(true),
                // concurrent duplicate hit the UNIQUE (book_id, user_id) constraint
                Err(LibrisError::Storage(e)) if e.is_constraint_violation() => Ok(false),
                Err(e) => Err(e),
            }
        })
        .await?;

    if inserted {
        events::review_posted(book_id, user_id, rating, false);
    } else {
        session.flash(ALREADY_REVIEWED);
    }
    redirect(&state, session, &format!("/book/{book_id}")).await
}

pub async fn edit_review_form(
    State(state): State<AppState>,
    current: AuthSession,
    Path(book_id): Path<i64>,
) -> Result<Response, WebError> {
    let user_id = current.user.user_id;
    let review = state
        .blocking(move |storage| storage.get_review(book_id, user_id))
        .await?
        .ok_or_else(|| WebError::NotFound(format!("no review of book {book_id} to edit")))?;
    View::new("edit_review")
        .with("book_id", book_id)
        .with("review", review)
        .render(&state, current.session)
        .await
}

pub async fn edit_review(
    State(state): State<AppState>,
    current: AuthSession,
    Path(book_id): Path<i64>,
    Form(form): Form<ReviewForm>,
) -> Result<Response, WebError> {
    let AuthSession { session, user } = current;
    verify_csrf(&session, &form.csrf_token, &format!("/book/{book_id}/review/edit"))?;

    let draft = match validation::validate_review(&form.rating, form.comment.as_deref()) {
        Ok(draft) => draft,
        Err(e) => {
            return form
                .echo(View::form_error("edit_review", e.to_string()), book_id)
                .render(&state, session)
                .await;
        }
    };

    let user_id = user.user_id;
    let rating = draft.rating;
    // a missing review surfaces as StorageError::NotFound -> 404
    state
        .blocking(move |storage| storage.update_review(book_id, user_id, &draft))
        .await?;
    events::review_posted(book_id, user_id, rating, true);
    redirect(&state, session, &format!("/book/{book_id}")).await
}

#[derive(Debug, Deserialize)]
pub struct CsrfForm {
    #[serde(default)]
    csrf_token: String,
}

pub async fn delete_review(
    State(state): State<AppState>,
    current: AuthSession,
    Path(book_id): Path<i64>,
    Form(form): Form<CsrfForm>,
) -> Result<Response, WebError> {
    let AuthSession { mut session, user } = current;
    verify_csrf(&session, &form.csrf_token, &format!("/book/{book_id}/review/delete"))?;

    let user_id = user.user_id;
    let deleted = state
        .blocking(move |storage| storage.delete_review(book_id, user_id))
        .await?;
    if !deleted {
        return Err(WebError::NotFound(format!("no review of book {book_id} to delete")));
    }
    session.flash("Review deleted");
    redirect(&state, session, &format!("/book/{book_id}")).await
}
