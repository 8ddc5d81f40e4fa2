//! JSON page views.
//!
//! Every view is an object with a `page` name, the page's own fields, and the
//! common `flashes`, `user` and (when logged in) `csrf_token` entries.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::WebError;
use crate::session::Session;
use crate::state::AppState;

pub struct View {
    name: &'static str,
    status: StatusCode,
    fields: Map<String, Value>,
}

impl View {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            status: StatusCode::OK,
            fields: Map::new(),
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with<T: Serialize>(mut self, key: &str, value: T) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|e| {
            tracing::warn!(key = key, error = %e, "view field not serialisable");
            Value::Null
        });
        self.fields.insert(key.to_string(), value);
        self
    }

    /// A form view re-rendered with an error message (422).
    pub fn form_error(name: &'static str, message: impl Into<String>) -> Self {
        Self::new(name)
            .status(StatusCode::UNPROCESSABLE_ENTITY)
            .with("error", message.into())
    }

    /// Render the view, consuming the session's flashes and committing it.
    pub async fn render(self, state: &AppState, mut session: Session) -> Result<Response, WebError> {
        let mut body = self.fields;
        body.insert("page".to_string(), Value::String(self.name.to_string()));
        body.insert(
            "flashes".to_string(),
            serde_json::to_value(session.take_flashes()).unwrap_or(Value::Null),
        );
        let user = session.user();
        if user.is_some() {
            body.insert(
                "csrf_token".to_string(),
                Value::String(session.csrf_token().to_string()),
            );
        }
        body.insert(
            "user".to_string(),
            serde_json::to_value(user).unwrap_or(Value::Null),
        );

        let jar = session.commit(state).await?;
        Ok((jar, (self.status, Json(Value::Object(body)))).into_response())
    }
}

/// Commit the session and answer with `303 See Other`.
pub async fn redirect(state: &AppState, session: Session, to: &str) -> Result<Response, WebError> {
    let jar = session.commit(state).await?;
    Ok((jar, Redirect::to(to)).into_response())
}
