//! Title search page.

use axum::extract::State;
use axum::response::Response;
use axum::Form;
use serde::{Deserialize, Serialize};

use libris_search::{search_titles, SearchOutcome};

use crate::auth::verify_csrf;
use crate::error::WebError;
use crate::session::AuthSession;
use crate::state::AppState;
use crate::views::{redirect, View};

pub async fn search_form(State(state): State<AppState>, current: AuthSession) -> Result<Response, WebError> {
    View::new("search").render(&state, current.session).await
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    csrf_token: String,
    #[serde(default)]
    query: String,
}

#[derive(Serialize)]
struct SuggestionView {
    book_id: i64,
    title: String,
    author: String,
    score: f64,
}

pub async fn search(
    State(state): State<AppState>,
    current: AuthSession,
    Form(form): Form<SearchForm>,
) -> Result<Response, WebError> {
    let session = current.session;
    verify_csrf(&session, &form.csrf_token, "/search")?;

    let query = form.query.clone();
    let config = state.config.search.clone();
    let outcome = state
        .blocking(move |storage| search_titles(storage, &query, &config))
        .await?;

    match outcome {
        SearchOutcome::Exact(book_id) => redirect(&state, session, &format!("/book/{book_id}")).await,
        SearchOutcome::Suggestions(found) => {
            let suggestions: Vec<SuggestionView> = found
                .into_iter()
                .map(|s| SuggestionView {
                    book_id: s.book.book_id,
                    title: s.book.title,
                    author: s.book.author,
                    score: s.score,
                })
                .collect();
            View::new("search")
                .with("query", &form.query)
                .with("suggestions", suggestions)
                .render(&state, session)
                .await
        }
    }
}
