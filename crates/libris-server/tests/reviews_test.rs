//! One review per user per book: post, edit, delete.

mod common;

use axum::http::StatusCode;
use common::TestApp;

#[tokio::test]
async fn second_review_is_refused_with_flash() {
    let mut app = TestApp::new().await;
    app.sign_up("bookworm").await;
    let book_id = app.add_book("Dune", &[]).await;
    let path = format!("/book/{book_id}/review");
    let detail_path = format!("/book/{book_id}");

    app.post_csrf(&path, &[("rating", "5"), ("comment", "Spice!")])
        .await
        .assert_redirect(&detail_path);
    app.post_csrf(&path, &[("rating", "1")])
        .await
        .assert_redirect(&detail_path);

    let detail = app.get(&detail_path).await;
    assert_eq!(detail.flashes(), vec!["You have already reviewed this book"]);
    assert_eq!(detail.json["rating"]["count"], 1);
    assert_eq!(detail.json["rating"]["average"], 5.0);
    assert_eq!(detail.json["own_review"]["rating"], 5);
    assert_eq!(detail.json["own_review"]["comment"], "Spice!");
    assert_eq!(detail.json["reviews"]["items"][0]["username"], "bookworm");
}

#[tokio::test]
async fn invalid_rating_rerenders() {
    let mut app = TestApp::new().await;
    app.sign_up("bookworm").await;
    let book_id = app.add_book("Dune", &[]).await;
    let path = format!("/book/{book_id}/review");

    for rating in ["0", "6", "great"] {
        let response = app.post_csrf(&path, &[("rating", rating)]).await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY, "rating {rating}");
        assert_eq!(response.json["page"], "review");
    }
    let detail = app.get(&format!("/book/{book_id}")).await;
    assert_eq!(detail.json["rating"]["count"], 0);
}

#[tokio::test]
async fn reviewing_a_missing_book_is_not_found() {
    let mut app = TestApp::new().await;
    app.sign_up("bookworm").await;
    let response = app.post_csrf("/book/42/review", &[("rating", "3")]).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edit_touches_only_own_review() {
    let mut author = TestApp::new().await;
    author.sign_up("bookworm").await;
    let book_id = author.add_book("Dune", &[]).await;
    let edit_path = format!("/book/{book_id}/review/edit");

    // no review yet
    assert_eq!(author.get(&edit_path).await.status, StatusCode::NOT_FOUND);
    let response = author.post_csrf(&edit_path, &[("rating", "2")]).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    author
        .post_csrf(&format!("/book/{book_id}/review"), &[("rating", "2")])
        .await;
    let mut reader = author.fork();
    reader.sign_up("stranger").await;
    reader
        .post_csrf(&format!("/book/{book_id}/review"), &[("rating", "4")])
        .await;

    let form = author.get(&edit_path).await;
    assert_eq!(form.json["page"], "edit_review");
    assert_eq!(form.json["review"]["rating"], 2);

    author
        .post_csrf(&edit_path, &[("rating", "3"), ("comment", "Grew on me")])
        .await
        .assert_redirect(&format!("/book/{book_id}"));

    let detail = reader.get(&format!("/book/{book_id}")).await;
    assert_eq!(detail.json["own_review"]["rating"], 4);
    assert_eq!(detail.json["rating"]["count"], 2);
    assert_eq!(detail.json["rating"]["average"], 3.5);
}

#[tokio::test]
async fn delete_review_flashes_and_then_404s() {
    let mut app = TestApp::new().await;
    app.sign_up("bookworm").await;
    let book_id = app.add_book("Dune", &[]).await;
    app.post_csrf(&format!("/book/{book_id}/review"), &[("rating", "4")])
        .await;

    let delete_path = format!("/book/{book_id}/review/delete");
    app.post_csrf(&delete_path, &[])
        .await
        .assert_redirect(&format!("/book/{book_id}"));
    let detail = app.get(&format!("/book/{book_id}")).await;
    assert_eq!(detail.flashes(), vec!["Review deleted"]);
    assert!(detail.json["own_review"].is_null());

    let again = app.post_csrf(&delete_path, &[]).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn review_routes_require_csrf() {
    let mut app = TestApp::new().await;
    app.sign_up("bookworm").await;
    let book_id = app.add_book("Dune", &[]).await;
    let response = app
        .post(&format!("/book/{book_id}/review"), &[("rating", "4")])
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
