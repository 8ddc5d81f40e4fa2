//! Book upload, detail, edit, delete and listing pagination.

mod common;

use axum::http::StatusCode;
use common::TestApp;
use libris_core::config::PaginationConfig;
use libris_core::LibrisConfig;

#[tokio::test]
async fn upload_adds_book_with_attributes() {
    let mut app = TestApp::new().await;
    let user_id = app.sign_up("bookworm").await;
    app.post_csrf(
        "/add_book/upload",
        &[
            ("title", "Dune"),
            ("author", "Frank Herbert"),
            ("publication_date", "1965-08-01"),
            ("genres", "Science fiction"),
            ("genres", "Classic"),
        ],
    )
    .await
    .assert_redirect("/");

    let home = app.get("/").await;
    assert_eq!(home.flashes(), vec!["\"Dune\" added to database"]);
    let book_id = home.json["books"]["items"][0]["book_id"].as_i64().unwrap();
    assert_eq!(home.json["books"]["items"][0]["title"], "Dune");
    assert_eq!(home.json["books"]["items"][0]["owner"], "bookworm");

    let detail = app.get(&format!("/book/{book_id}")).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.json["page"], "book");
    assert_eq!(detail.json["book"]["user_id"], user_id);
    assert_eq!(detail.json["owner"], "bookworm");
    assert_eq!(detail.json["attributes"]["publication_date"], "1965-08-01");
    assert_eq!(
        detail.json["attributes"]["genres"],
        serde_json::json!(["Science fiction", "Classic"])
    );
    assert_eq!(detail.json["can_edit"], true);
    assert_eq!(detail.json["rating"]["count"], 0);
}

#[tokio::test]
async fn upload_requires_csrf_token() {
    let mut app = TestApp::new().await;
    app.sign_up("bookworm").await;

    let missing = app
        .post("/add_book/upload", &[("title", "Dune"), ("author", "Frank Herbert")])
        .await;
    assert_eq!(missing.status, StatusCode::FORBIDDEN);

    let wrong = app
        .post(
            "/add_book/upload",
            &[("title", "Dune"), ("author", "Frank Herbert"), ("csrf_token", "nope")],
        )
        .await;
    assert_eq!(wrong.status, StatusCode::FORBIDDEN);
    assert_eq!(app.get("/books").await.json["books"]["total"], 0);
}

#[tokio::test]
async fn upload_validation_statuses() {
    let mut app = TestApp::new().await;
    app.sign_up("bookworm").await;

    let empty_title = app
        .post_csrf("/add_book/upload", &[("title", "  "), ("author", "Someone")])
        .await;
    assert_eq!(empty_title.status, StatusCode::FORBIDDEN);

    let long_author = "a".repeat(101);
    let too_long = app
        .post_csrf("/add_book/upload", &[("title", "Dune"), ("author", long_author.as_str())])
        .await;
    assert_eq!(too_long.status, StatusCode::FORBIDDEN);

    let bad_date = app
        .post_csrf(
            "/add_book/upload",
            &[("title", "Dune"), ("author", "Frank Herbert"), ("publication_date", "August 1965")],
        )
        .await;
    assert_eq!(bad_date.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(bad_date.json["page"], "add_book");
    assert_eq!(bad_date.json["title"], "Dune");

    let bad_genre = app
        .post_csrf(
            "/add_book/upload",
            &[("title", "Dune"), ("author", "Frank Herbert"), ("genres", "Cookbooks")],
        )
        .await;
    assert_eq!(bad_genre.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn missing_book_is_not_found() {
    let mut app = TestApp::new().await;
    assert_eq!(app.get("/book/999").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_the_owner_may_edit_or_delete() {
    let mut owner = TestApp::new().await;
    owner.sign_up("bookworm").await;
    let book_id = owner.add_book("Dune", &[]).await;

    let mut other = owner.fork();
    other.sign_up("stranger").await;
    let edit_path = format!("/book/{book_id}/edit");
    let delete_path = format!("/book/{book_id}/delete");

    assert_eq!(other.get(&edit_path).await.status, StatusCode::FORBIDDEN);
    assert_eq!(other.get(&delete_path).await.status, StatusCode::FORBIDDEN);
    let attempt = other
        .post_csrf(&edit_path, &[("title", "Stolen"), ("author", "Thief")])
        .await;
    assert_eq!(attempt.status, StatusCode::FORBIDDEN);
    let attempt = other.post_csrf(&delete_path, &[("delete", "1")]).await;
    assert_eq!(attempt.status, StatusCode::FORBIDDEN);

    let detail = other.get(&format!("/book/{book_id}")).await;
    assert_eq!(detail.json["book"]["title"], "Dune");
    assert_eq!(detail.json["can_edit"], false);
}

#[tokio::test]
async fn owner_edit_rewrites_changed_fields() {
    let mut app = TestApp::new().await;
    app.sign_up("bookworm").await;
    let book_id = app.add_book("Dune", &["Classic"]).await;
    let path = format!("/book/{book_id}/edit");

    let form = app.get(&path).await;
    assert_eq!(form.json["page"], "edit_book");
    assert_eq!(form.json["book"]["title"], "Dune");

    app.post_csrf(
        &path,
        &[
            ("title", "Dune Messiah"),
            ("author", "Frank Herbert"),
            ("publication_date", ""),
            ("genres", "Science fiction"),
        ],
    )
    .await
    .assert_redirect(&format!("/book/{book_id}"));

    let detail = app.get(&format!("/book/{book_id}")).await;
    assert_eq!(detail.json["book"]["title"], "Dune Messiah");
    assert!(detail.json["attributes"]["publication_date"].is_null());
    assert_eq!(
        detail.json["attributes"]["genres"],
        serde_json::json!(["Science fiction"])
    );
}

#[tokio::test]
async fn delete_needs_confirmation() {
    let mut app = TestApp::new().await;
    app.sign_up("bookworm").await;
    let book_id = app.add_book("Dune", &[]).await;
    let path = format!("/book/{book_id}/delete");

    let confirm = app.get(&path).await;
    assert_eq!(confirm.json["page"], "delete_book");

    app.post_csrf(&path, &[("cancel", "1")])
        .await
        .assert_redirect(&format!("/book/{book_id}"));
    assert_eq!(app.get(&format!("/book/{book_id}")).await.status, StatusCode::OK);

    app.post_csrf(&path, &[("delete", "1")])
        .await
        .assert_redirect("/");
    let home = app.get("/").await;
    assert_eq!(
        home.flashes(),
        vec!["\"Dune\" successfully removed from database."]
    );
    assert_eq!(
        app.get(&format!("/book/{book_id}")).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn listing_pages_are_clamped() {
    let config = LibrisConfig {
        pagination: PaginationConfig {
            books_per_page: Some(2),
            reviews_per_page: Some(2),
        },
        ..LibrisConfig::default()
    };
    let mut app = TestApp::with_config(config).await;
    app.sign_up("bookworm").await;

    app.get("/books?page=3").await.assert_redirect("/books?page=1");
    for title in ["Dune", "Emma", "Ulysses"] {
        app.add_book(title, &[]).await;
    }

    let first = app.get("/books").await;
    assert_eq!(first.json["books"]["page"], 1);
    assert_eq!(first.json["books"]["page_count"], 2);
    assert_eq!(first.json["books"]["items"][0]["title"], "Ulysses");

    let second = app.get("/books?page=2").await;
    assert_eq!(second.json["books"]["items"][0]["title"], "Dune");

    app.get("/books?page=0").await.assert_redirect("/books?page=1");
    app.get("/books?page=-4").await.assert_redirect("/books?page=1");
    app.get("/books?page=9").await.assert_redirect("/books?page=2");
    assert_eq!(app.get("/books?page=abc").await.json["books"]["page"], 1);
}

#[tokio::test]
async fn detail_review_pages_are_clamped() {
    let mut app = TestApp::new().await;
    app.sign_up("bookworm").await;
    let book_id = app.add_book("Dune", &[]).await;

    let mut visitor = app.fork();
    visitor
        .get(&format!("/book/{book_id}?page=9"))
        .await
        .assert_redirect(&format!("/book/{book_id}?page=1"));
    visitor
        .get(&format!("/book/{book_id}?page=0"))
        .await
        .assert_redirect(&format!("/book/{book_id}?page=1"));
    let detail = visitor.get(&format!("/book/{book_id}?page=1")).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.json["reviews"]["page"], 1);
}
