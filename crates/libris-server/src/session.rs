//! Server-side sessions keyed by the `libris_session` cookie.
//!
//! A request without a valid cookie gets an in-memory anonymous session that
//! is only persisted once something is written to it (a flash or a login).
//! Handlers must hand the session back through [`Session::commit`] to persist
//! changes and emit the cookie.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use uuid::Uuid;

use libris_core::constants::SESSION_COOKIE;
use libris_core::models::SessionRecord;
use libris_core::traits::ISessionStorage;

use crate::error::WebError;
use crate::state::AppState;

/// The logged-in user attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SessionUser {
    pub user_id: i64,
    pub username: String,
}

pub struct Session {
    record: SessionRecord,
    jar: CookieJar,
    /// Stored id this session replaced; deleted on commit.
    replaced: Option<String>,
    dirty: bool,
}

fn random_token() -> String {
    Uuid::new_v4().simple().to_string()
}

impl Session {
    fn fresh(jar: CookieJar) -> Self {
        Self {
            record: SessionRecord {
                session_id: random_token(),
                user_id: None,
                username: None,
                csrf_token: random_token(),
                flashes: Vec::new(),
                expires_at: Utc::now(),
            },
            jar,
            replaced: None,
            dirty: false,
        }
    }

    pub fn user(&self) -> Option<SessionUser> {
        if !self.record.is_authenticated() {
            return None;
        }
        Some(SessionUser {
            user_id: self.record.user_id?,
            username: self.record.username.clone()?,
        })
    }

    pub fn csrf_token(&self) -> &str {
        &self.record.csrf_token
    }

    /// Queue a message for the next rendered page.
    pub fn flash(&mut self, message: impl Into<String>) {
        self.record.flashes.push(message.into());
        self.dirty = true;
    }

    /// Drain pending flashes.
    pub fn take_flashes(&mut self) -> Vec<String> {
        if self.record.flashes.is_empty() {
            return Vec::new();
        }
        self.dirty = true;
        std::mem::take(&mut self.record.flashes)
    }

    /// Attach a user, rotating the session id and CSRF token.
    /// Pending flashes carry over.
    pub fn login(&mut self, user_id: i64, username: &str) {
        self.rotate();
        self.record.user_id = Some(user_id);
        self.record.username = Some(username.to_string());
    }

    /// Drop the user and start a new anonymous session.
    pub fn logout(&mut self) {
        self.rotate();
        self.record.user_id = None;
        self.record.username = None;
        self.record.flashes.clear();
    }

    fn rotate(&mut self) {
        let old = std::mem::replace(&mut self.record.session_id, random_token());
        // an id never written needs no cleanup
        if self.replaced.is_none() && self.jar.get(SESSION_COOKIE).is_some() {
            self.replaced = Some(old);
        }
        self.record.csrf_token = random_token();
        self.dirty = true;
    }

    /// Persist pending changes and return the cookie jar for the response.
    pub async fn commit(mut self, state: &AppState) -> Result<CookieJar, WebError> {
        if !self.dirty {
            return Ok(self.jar);
        }

        let ttl_secs = state.config.server.effective_session_ttl_secs();
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or_else(|| Duration::days(365));
        let now = Utc::now();
        self.record.expires_at = now
            .checked_add_signed(ttl)
            .unwrap_or_else(|| now + Duration::days(365));

        let record = self.record.clone();
        let replaced = self.replaced.take();
        state
            .blocking(move |storage| {
                if let Some(old) = replaced {
                    storage.delete_session(&old)?;
                }
                storage.save_session(&record)
            })
            .await?;

        let cookie = Cookie::build((SESSION_COOKIE, self.record.session_id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(state.config.server.effective_secure_cookies());
        Ok(self.jar.add(cookie))
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(session_id) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
            return Ok(Self::fresh(jar));
        };

        let loaded = state
            .blocking(move |storage| storage.load_session(&session_id, Utc::now()))
            .await?;
        Ok(match loaded {
            Some(record) => Self {
                record,
                jar,
                replaced: None,
                dirty: false,
            },
            None => Self::fresh(jar),
        })
    }
}

/// A session that is known to be logged in.
///
/// Extracting it on an anonymous request redirects to the login page with
/// the requested path as `next`.
pub struct AuthSession {
    pub session: Session,
    pub user: SessionUser,
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        match session.user() {
            Some(user) => Ok(Self { session, user }),
            None => Err(WebError::LoginRequired {
                next: parts.uri.path().to_string(),
            }),
        }
    }
}
