//! Public user profiles.

use axum::extract::{Path, Query, State};
use axum::response::Response;

use libris_core::models::PageRequest;
use libris_core::traits::ICatalogStorage;

use super::PageQuery;
use crate::error::WebError;
use crate::session::Session;
use crate::state::AppState;
use crate::views::{redirect, View};

pub async fn profile(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Response, WebError> {
    let page = match query.requested() {
        Ok(page) => page,
        Err(target) => {
            return redirect(&state, session, &format!("/user/{user_id}?page={target}")).await
        }
    };
    let request = PageRequest::new(page, state.config.pagination.effective_books_per_page());

    let loaded = state
        .blocking(move |storage| {
            let Some(user) = storage.get_user(user_id)? else {
                return Ok(None);
            };
            let books = storage.books_by_user(user_id, request)?;
            let review_count = storage.review_count_by_user(user_id)?;
            Ok(Some((user, books, review_count)))
        })
        .await?;
    let Some((user, books, review_count)) = loaded else {
        return Err(WebError::NotFound(format!("user {user_id} not found")));
    };
    if let Some(target) = books.overflow_target() {
        return redirect(&state, session, &format!("/user/{user_id}?page={target}")).await;
    }

    View::new("profile")
        .with("profile", user)
        .with("books", books)
        .with("review_count", review_count)
        .render(&state, session)
        .await
}
