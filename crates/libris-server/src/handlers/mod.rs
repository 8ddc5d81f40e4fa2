//! Route handlers, grouped by resource.

pub mod account;
pub mod books;
pub mod reviews;
pub mod search;
pub mod users;

use serde::Deserialize;

use libris_core::models::{Book, BookAttributes};
use libris_core::traits::ICatalogStorage;

use crate::error::WebError;
use crate::state::AppState;

/// `?page=n` on paginated routes. Unparseable values mean page 1.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    /// The requested page, or `Err(1)` when it is below 1 and the client
    /// should be redirected to the first page.
    pub fn requested(&self) -> Result<u32, u32> {
        let raw = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1);
        if raw < 1 {
            return Err(1);
        }
        Ok(u32::try_from(raw).unwrap_or(u32::MAX))
    }
}

/// A book with its attributes, or 404.
pub(crate) async fn load_book(state: &AppState, book_id: i64) -> Result<(Book, BookAttributes), WebError> {
    let found = state
        .blocking(move |storage| {
            let Some(book) = storage.get_book(book_id)? else {
                return Ok(None);
            };
            let attrs = storage.get_book_attributes(book_id)?;
            Ok(Some((book, attrs)))
        })
        .await?;
    found.ok_or_else(|| WebError::NotFound(format!("book {book_id} not found")))
}

/// Like [`load_book`], but 403 unless `user_id` added the book.
pub(crate) async fn load_owned_book(
    state: &AppState,
    book_id: i64,
    user_id: i64,
) -> Result<(Book, BookAttributes), WebError> {
    let (book, attrs) = load_book(state, book_id).await?;
    if book.user_id != user_id {
        return Err(WebError::Forbidden(format!(
            "only the user who added book {book_id} may change it"
        )));
    }
    Ok((book, attrs))
}
