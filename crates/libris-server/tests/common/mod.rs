//! In-process client for the router: carries the session cookie between
//! requests and decodes JSON views.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use libris_core::LibrisConfig;
use libris_server::{build_router, AppState};
use libris_storage::StorageEngine;

pub const PASSWORD: &str = "correct horse";

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub json: Value,
}

impl TestResponse {
    pub fn flashes(&self) -> Vec<String> {
        self.json["flashes"]
            .as_array()
            .map(|a| a.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
            .unwrap_or_default()
    }

    pub fn assert_redirect(&self, to: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.json);
        assert_eq!(self.location.as_deref(), Some(to));
    }
}

pub struct TestApp {
    router: Router,
    cookie: Option<String>,
    csrf: Option<String>,
}

fn encode(value: &str) -> String {
    let mut out = String::new();
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(LibrisConfig::default()).await
    }

    pub async fn with_config(config: LibrisConfig) -> Self {
        // the engine's writer lock must not be taken on the async runtime
        let engine = tokio::task::spawn_blocking(StorageEngine::open_in_memory)
            .await
            .unwrap()
            .unwrap();
        Self {
            router: build_router(AppState::new(engine, config)),
            cookie: None,
            csrf: None,
        }
    }

    /// A second client sharing nothing but the server.
    pub fn fork(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
            csrf: None,
        }
    }

    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    pub fn set_cookie(&mut self, pair: &str) {
        self.cookie = Some(pair.to_string());
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = Request::get(path);
        self.send(request, Body::empty()).await
    }

    pub async fn post(&mut self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let body = form
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = Request::post(path).header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request, Body::from(body)).await
    }

    /// POST with the session's CSRF token added.
    pub async fn post_csrf(&mut self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let token = self.csrf.clone().expect("log in before posting with a csrf token");
        let mut fields: Vec<(&str, &str)> = form.to_vec();
        fields.push(("csrf_token", token.as_str()));
        self.post(path, &fields).await
    }

    async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie.as_str());
        }
        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        for value in response.headers().get_all(SET_COOKIE) {
            let pair = value.to_str().unwrap().split(';').next().unwrap_or_default();
            if pair.starts_with("libris_session=") {
                self.cookie = Some(pair.to_string());
            }
        }
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            location,
            json,
        }
    }

    pub async fn register(&mut self, username: &str) -> TestResponse {
        self.post(
            "/create_account",
            &[
                ("username", username),
                ("password1", PASSWORD),
                ("password2", PASSWORD),
            ],
        )
        .await
    }

    /// Log in and remember the new CSRF token. Drains pending flashes.
    pub async fn login(&mut self, username: &str) -> TestResponse {
        let response = self
            .post(
                "/logging_in",
                &[("username", username), ("password", PASSWORD)],
            )
            .await;
        let page = self.get("/").await;
        self.csrf = page.json["csrf_token"].as_str().map(str::to_string);
        response
    }

    /// Register and log in; returns the new user's id.
    pub async fn sign_up(&mut self, username: &str) -> i64 {
        self.register(username).await.assert_redirect("/");
        self.login(username).await.assert_redirect("/");
        let page = self.get("/").await;
        page.json["user"]["user_id"].as_i64().unwrap()
    }

    /// Upload a book and return its id.
    pub async fn add_book(&mut self, title: &str, genres: &[&str]) -> i64 {
        let mut form = vec![
            ("title", title),
            ("author", "Frank Herbert"),
            ("publication_date", "1965-08-01"),
        ];
        for genre in genres {
            form.push(("genres", *genre));
        }
        self.post_csrf("/add_book/upload", &form)
            .await
            .assert_redirect("/");
        let listing = self.get("/books").await;
        listing.json["books"]["items"][0]["book_id"].as_i64().unwrap()
    }
}
