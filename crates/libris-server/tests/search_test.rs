//! Title search and user profiles over HTTP.

mod common;

use axum::http::StatusCode;
use common::TestApp;

#[tokio::test]
async fn exact_title_redirects_to_book() {
    let mut app = TestApp::new().await;
    app.sign_up("bookworm").await;
    let book_id = app.add_book("The Left Hand of Darkness", &[]).await;

    let form = app.get("/search").await;
    assert_eq!(form.json["page"], "search");

    app.post_csrf("/search", &[("query", "The Left Hand of Darkness")])
        .await
        .assert_redirect(&format!("/book/{book_id}"));
}

#[tokio::test]
async fn misspelt_title_gets_suggestions() {
    let mut app = TestApp::new().await;
    app.sign_up("bookworm").await;
    let hobbit = app.add_book("The Hobbit", &[]).await;
    app.add_book("Middlemarch", &[]).await;

    let response = app.post_csrf("/search", &[("query", "the hobit")]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json["query"], "the hobit");
    let suggestions = response.json["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["book_id"], hobbit);
    assert_eq!(suggestions[0]["title"], "The Hobbit");
}

#[tokio::test]
async fn blank_query_renders_empty_suggestions() {
    let mut app = TestApp::new().await;
    app.sign_up("bookworm").await;
    let response = app.post_csrf("/search", &[("query", "   ")]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json["suggestions"], serde_json::json!([]));
}

#[tokio::test]
async fn search_post_requires_login_and_csrf() {
    let mut app = TestApp::new().await;
    app.post("/search", &[("query", "Dune")])
        .await
        .assert_redirect("/login?next=%2Fsearch");

    app.sign_up("bookworm").await;
    let response = app.post("/search", &[("query", "Dune")]).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn profile_lists_books_and_review_count() {
    let mut app = TestApp::new().await;
    let user_id = app.sign_up("bookworm").await;
    let book_id = app.add_book("Dune", &[]).await;
    app.add_book("Emma", &[]).await;
    app.post_csrf(&format!("/book/{book_id}/review"), &[("rating", "5")])
        .await;

    // profiles are public
    let mut visitor = app.fork();
    let profile = visitor.get(&format!("/user/{user_id}")).await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.json["page"], "profile");
    assert_eq!(profile.json["profile"]["username"], "bookworm");
    assert!(profile.json["profile"]["join_date"].as_str().is_some());
    assert_eq!(profile.json["books"]["total"], 2);
    assert_eq!(profile.json["review_count"], 1);

    assert_eq!(
        visitor.get("/user/9999").await.status,
        StatusCode::NOT_FOUND
    );
    visitor
        .get(&format!("/user/{user_id}?page=5"))
        .await
        .assert_redirect(&format!("/user/{user_id}?page=1"));
    visitor
        .get(&format!("/user/{user_id}?page=7"))
        .await
        .assert_redirect(&format!("/user/{user_id}?page=1"));
    visitor
        .get(&format!("/user/{user_id}?page=0"))
        .await
        .assert_redirect(&format!("/user/{user_id}?page=1"));
}
