//! Registration, login and logout.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::Form;
use serde::Deserialize;

use libris_core::errors::{AuthError, LibrisError, ValidationError};
use libris_core::tracing::events;
use libris_core::traits::ICatalogStorage;
use libris_core::validation;

use crate::auth;
use crate::error::WebError;
use crate::session::{AuthSession, Session};
use crate::state::AppState;
use crate::views::{redirect, View};

pub async fn register_form(State(state): State<AppState>, session: Session) -> Result<Response, WebError> {
    View::new("register").render(&state, session).await
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password1: String,
    #[serde(default)]
    password2: String,
}

pub async fn create_account(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, WebError> {
    let username = form.username.trim().to_string();
    validation::validate_username(&username).map_err(|e| WebError::Forbidden(e.to_string()))?;
    match validation::validate_new_password(&form.password1, &form.password2) {
        Ok(()) => {}
        Err(ValidationError::PasswordMismatch) => {
            return View::form_error("register", ValidationError::PasswordMismatch.to_string())
                .with("username", &username)
                .render(&state, session)
                .await;
        }
        Err(e) => return Err(WebError::Forbidden(e.to_string())),
    }

    let name = username.clone();
    let password = form.password1;
    let created = state
        .blocking(move |storage| {
            if storage.get_credentials(&name)?.is_some() {
                return Err(AuthError::UsernameTaken.into());
            }
            let hash = auth::hash_password(&password)?;
            match storage.create_user(&name, &hash) {
                // lost a race with a concurrent registration
                Err(LibrisError::Storage(e)) if e.is_constraint_violation() => {
                    Err(AuthError::UsernameTaken.into())
                }
                other => other,
            }
        })
        .await;

    let user_id = match created {
        Ok(id) => id,
        Err(WebError::Libris(LibrisError::Auth(AuthError::UsernameTaken))) => {
            return View::form_error("register", AuthError::UsernameTaken.to_string())
                .with("username", &username)
                .render(&state, session)
                .await;
        }
        Err(e) => return Err(e),
    };

    events::user_registered(user_id, &username);
    session.flash("Account created");
    redirect(&state, session, "/").await
}

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

pub async fn login_form(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NextQuery>,
) -> Result<Response, WebError> {
    View::new("login")
        .with("next", query.next)
        .render(&state, session)
        .await
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    next: Option<String>,
}

pub async fn logging_in(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let username = form.username.trim().to_string();
    let name = username.clone();
    let password = form.password;
    let user_id = state
        .blocking(move |storage| {
            let Some(creds) = storage.get_credentials(&name)? else {
                return Ok(None);
            };
            Ok(auth::verify_password(&password, &creds.password_hash).then_some(creds.user_id))
        })
        .await?;

    let Some(user_id) = user_id else {
        events::login_failed(&username);
        return View::form_error("login", AuthError::InvalidCredentials.to_string())
            .with("username", &username)
            .with("next", &form.next)
            .render(&state, session)
            .await;
    };

    session.login(user_id, &username);
    session.flash("Successfully logged in");
    events::user_logged_in(user_id);
    let target = auth::safe_next(form.next.as_deref()).to_string();
    redirect(&state, session, &target).await
}

pub async fn logout(State(state): State<AppState>, current: AuthSession) -> Result<Response, WebError> {
    let mut session = current.session;
    session.logout();
    session.flash("Successfully logged out");
    redirect(&state, session, "/").await
}
