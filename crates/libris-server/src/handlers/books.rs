//! Catalog listings and book create/read/update/delete.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum_extra::extract::Form;
use serde::Deserialize;

use libris_core::constants::GENRES;
use libris_core::errors::ValidationError;
use libris_core::models::{BookUpdate, NewBook, PageRequest};
use libris_core::tracing::events;
use libris_core::traits::ICatalogStorage;
use libris_core::validation;

use super::{load_book, load_owned_book, PageQuery};
use crate::auth::verify_csrf;
use crate::error::WebError;
use crate::session::{AuthSession, Session};
use crate::state::AppState;
use crate::views::{redirect, View};

pub async fn index(State(state): State<AppState>, session: Session) -> Result<Response, WebError> {
    let request = PageRequest::new(1, state.config.pagination.effective_books_per_page());
    let books = state.blocking(move |storage| storage.list_books(request)).await?;
    View::new("index")
        .with("books", books)
        .render(&state, session)
        .await
}

pub async fn list_books(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Result<Response, WebError> {
    let page = match query.requested() {
        Ok(page) => page,
        Err(target) => return redirect(&state, session, &format!("/books?page={target}")).await,
    };
    let request = PageRequest::new(page, state.config.pagination.effective_books_per_page());
    let books = state.blocking(move |storage| storage.list_books(request)).await?;
    if let Some(target) = books.overflow_target() {
        return redirect(&state, session, &format!("/books?page={target}")).await;
    }
    View::new("books")
        .with("books", books)
        .render(&state, session)
        .await
}

/// Fields shared by the add and edit forms. `genres` may repeat.
#[derive(Debug, Default, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    csrf_token: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    publication_date: String,
    #[serde(default)]
    genres: Vec<String>,
}

struct ValidBook {
    title: String,
    author: String,
    publication_date: Option<String>,
    genres: Vec<String>,
}

impl BookForm {
    /// Title and author limits are enforced by the form itself, so a
    /// violation is rejected outright (403). Date and genre problems are
    /// reported back on the form (422).
    fn validate(&self) -> Result<Result<ValidBook, ValidationError>, WebError> {
        let title = self.title.trim();
        let author = self.author.trim();
        validation::validate_title(title).map_err(|e| WebError::Forbidden(e.to_string()))?;
        validation::validate_author(author).map_err(|e| WebError::Forbidden(e.to_string()))?;

        let soft = validation::normalize_publication_date(Some(self.publication_date.as_str()))
            .and_then(|publication_date| {
                let genres = validation::normalize_genres(&self.genres)?;
                Ok(ValidBook {
                    title: title.to_string(),
                    author: author.to_string(),
                    publication_date,
                    genres,
                })
            });
        Ok(soft)
    }

    fn echo(&self, view: View) -> View {
        view.with("title", &self.title)
            .with("author", &self.author)
            .with("publication_date", &self.publication_date)
            .with("selected_genres", &self.genres)
            .with("genres", GENRES)
    }
}

pub async fn add_book_form(State(state): State<AppState>, current: AuthSession) -> Result<Response, WebError> {
    View::new("add_book")
        .with("genres", GENRES)
        .render(&state, current.session)
        .await
}

pub async fn upload_book(
    State(state): State<AppState>,
    current: AuthSession,
    Form(form): Form<BookForm>,
) -> Result<Response, WebError> {
    let AuthSession { mut session, user } = current;
    verify_csrf(&session, &form.csrf_token, "/add_book/upload")?;

    let valid = match form.validate()? {
        Ok(valid) => valid,
        Err(e) => {
            return form
                .echo(View::form_error("add_book", e.to_string()))
                .render(&state, session)
                .await;
        }
    };

    let genre_count = valid.genres.len();
    let title = valid.title.clone();
    let new_book = NewBook {
        user_id: user.user_id,
        title: valid.title,
        author: valid.author,
        publication_date: valid.publication_date,
        genres: valid.genres,
    };
    let book_id = state.blocking(move |storage| storage.add_book(&new_book)).await?;

    events::book_added(book_id, user.user_id, genre_count);
    session.flash(format!("\"{title}\" added to database"));
    redirect(&state, session, "/").await
}

pub async fn book_detail(
    State(state): State<AppState>,
    session: Session,
    Path(book_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Response, WebError> {
    let page = match query.requested() {
        Ok(page) => page,
        Err(target) => {
            return redirect(&state, session, &format!("/book/{book_id}?page={target}")).await
        }
    };
    let (book, attributes) = load_book(&state, book_id).await?;

    let request = PageRequest::new(page, state.config.pagination.effective_reviews_per_page());
    let viewer = session.user().map(|u| u.user_id);
    let owner_id = book.user_id;
    let (owner, rating, reviews, own_review) = state
        .blocking(move |storage| {
            let owner = storage.get_user(owner_id)?;
            let rating = storage.rating_summary(book_id)?;
            let reviews = storage.reviews_for_book(book_id, request)?;
            let own_review = match viewer {
                Some(user_id) => storage.get_review(book_id, user_id)?,
                None => None,
            };
            Ok((owner, rating, reviews, own_review))
        })
        .await?;
    if let Some(target) = reviews.overflow_target() {
        return redirect(&state, session, &format!("/book/{book_id}?page={target}")).await;
    }

    View::new("book")
        .with("can_edit", viewer == Some(book.user_id))
        .with("book", &book)
        .with("owner", owner.map(|u| u.username))
        .with("attributes", &attributes)
        .with("rating", rating)
        .with("reviews", reviews)
        .with("own_review", own_review)
        .render(&state, session)
        .await
}

pub async fn edit_book_form(
    State(state): State<AppState>,
    current: AuthSession,
    Path(book_id): Path<i64>,
) -> Result<Response, WebError> {
    let (book, attributes) = load_owned_book(&state, book_id, current.user.user_id).await?;
    View::new("edit_book")
        .with("book", &book)
        .with("attributes", &attributes)
        .with("genres", GENRES)
        .render(&state, current.session)
        .await
}

pub async fn edit_book(
    State(state): State<AppState>,
    current: AuthSession,
    Path(book_id): Path<i64>,
    Form(form): Form<BookForm>,
) -> Result<Response, WebError> {
    let AuthSession { session, user } = current;
    verify_csrf(&session, &form.csrf_token, &format!("/book/{book_id}/edit"))?;
    let (book, attributes) = load_owned_book(&state, book_id, user.user_id).await?;

    let valid = match form.validate()? {
        Ok(valid) => valid,
        Err(e) => {
            return form
                .echo(View::form_error("edit_book", e.to_string()))
                .with("book", &book)
                .render(&state, session)
                .await;
        }
    };

    let update = BookUpdate::diff(
        &book,
        &attributes,
        &valid.title,
        &valid.author,
        valid.publication_date.as_deref(),
        &valid.genres,
    );
    if !update.is_empty() {
        let changed = update.changed_fields();
        state
            .blocking(move |storage| storage.update_book(book_id, &update))
            .await?;
        events::book_updated(book_id, changed);
    }
    redirect(&state, session, &format!("/book/{book_id}")).await
}

pub async fn delete_book_form(
    State(state): State<AppState>,
    current: AuthSession,
    Path(book_id): Path<i64>,
) -> Result<Response, WebError> {
    let (book, _) = load_owned_book(&state, book_id, current.user.user_id).await?;
    View::new("delete_book")
        .with("book", &book)
        .render(&state, current.session)
        .await
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    csrf_token: String,
    /// Present only when the user confirmed; any other submit cancels.
    delete: Option<String>,
}

pub async fn delete_book(
    State(state): State<AppState>,
    current: AuthSession,
    Path(book_id): Path<i64>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, WebError> {
    let AuthSession { mut session, user } = current;
    verify_csrf(&session, &form.csrf_token, &format!("/book/{book_id}/delete"))?;
    let (book, _) = load_owned_book(&state, book_id, user.user_id).await?;

    if form.delete.is_none() {
        return redirect(&state, session, &format!("/book/{book_id}")).await;
    }

    state
        .blocking(move |storage| storage.delete_book(book_id))
        .await?;
    events::book_deleted(book_id, user.user_id);
    session.flash(format!("\"{}\" successfully removed from database.", book.title));
    redirect(&state, session, "/").await
}
