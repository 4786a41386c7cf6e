//! Integration tests for the new-topic flow.
//!
//! Covers the read view, validation failures, successful creation, not-found
//! boards, and the anonymous-access redirect.

mod common;

use axum::http::header::{COOKIE, LOCATION};
use axum::http::StatusCode;
use palaver::forum::{PostRepository, TopicRepository};

use common::{create_board, create_test_server, create_user, login};

#[tokio::test]
async fn test_new_topic_view_success_status_code() {
    let (server, db) = create_test_server().await;
    create_board(&db, "Django", "Django board.").await;
    create_user(&db, "john", "password123").await;
    let cookie = login(&server, "john", "password123").await;

    let response = server
        .get("/boards/1/new/")
        .add_header(COOKIE, cookie)
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_new_topic_view_not_found_status_code() {
    let (server, db) = create_test_server().await;
    create_board(&db, "Django", "Django board.").await;
    create_user(&db, "john", "password123").await;
    let cookie = login(&server, "john", "password123").await;

    let response = server
        .get("/boards/99/new/")
        .add_header(COOKIE, cookie)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_new_topic_view_contains_link_back_to_board_topics_view() {
    let (server, db) = create_test_server().await;
    let board_id = create_board(&db, "Django", "Django board.").await;
    create_user(&db, "john", "password123").await;
    let cookie = login(&server, "john", "password123").await;

    let response = server
        .get(&format!("/boards/{board_id}/new/"))
        .add_header(COOKIE, cookie)
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains(&format!("href=\"/boards/{board_id}/topics/\"")));
}

#[tokio::test]
async fn test_new_topic_view_contains_csrf_token_field() {
    let (server, db) = create_test_server().await;
    create_board(&db, "Django", "Django board.").await;
    create_user(&db, "john", "password123").await;
    let cookie = login(&server, "john", "password123").await;

    let response = server
        .get("/boards/1/new/")
        .add_header(COOKIE, cookie)
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("name=\"csrf_token\""));
}

#[tokio::test]
async fn test_new_topic_valid_post_data() {
    let (server, db) = create_test_server().await;
    let board_id = create_board(&db, "Django", "Django board.").await;
    let user_id = create_user(&db, "john", "password123").await;
    let cookie = login(&server, "john", "password123").await;

    let response = server
        .post(&format!("/boards/{board_id}/new/"))
        .add_header(COOKIE, cookie)
        .form(&[
            ("subject", "Test title"),
            ("message", "Lorem ipsum dolor sit amet"),
        ])
        .await;

    assert!(response.status_code().is_redirection());

    let topic_repo = TopicRepository::new(db.pool());
    let post_repo = PostRepository::new(db.pool());
    assert_eq!(topic_repo.count().await.unwrap(), 1);
    assert_eq!(post_repo.count().await.unwrap(), 1);

    let topic = topic_repo.get_by_id(1).await.unwrap().unwrap();
    assert_eq!(topic.subject, "Test title");
    assert_eq!(topic.board_id, board_id);
    assert_eq!(topic.starter_id, user_id);

    let posts = post_repo.list_by_topic(topic.id).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].message, "Lorem ipsum dolor sit amet");
    assert_eq!(posts[0].created_by, user_id);
}

#[tokio::test]
async fn test_new_topic_redirects_to_created_topic() {
    let (server, db) = create_test_server().await;
    let board_id = create_board(&db, "Django", "Django board.").await;
    create_user(&db, "john", "password123").await;
    let cookie = login(&server, "john", "password123").await;

    let response = server
        .post(&format!("/boards/{board_id}/new/"))
        .add_header(COOKIE, cookie.clone())
        .form(&[("subject", "Test title"), ("message", "Lorem ipsum")])
        .await;

    let location = response
        .headers()
        .get(LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(location, format!("/boards/{board_id}/topics/1/"));

    // The redirect target renders the new topic
    let response = server.get(&location).add_header(COOKIE, cookie).await;
    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Test title"));
    assert!(body.contains("Lorem ipsum"));
}

#[tokio::test]
async fn test_new_topic_invalid_post_data() {
    let (server, db) = create_test_server().await;
    create_board(&db, "Django", "Django board.").await;
    create_user(&db, "john", "password123").await;
    let cookie = login(&server, "john", "password123").await;

    // No form fields at all: binds to an empty form with errors
    let response = server
        .post("/boards/1/new/")
        .add_header(COOKIE, cookie)
        .form(&Vec::<(String, String)>::new())
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("This field is required."));
}

#[tokio::test]
async fn test_new_topic_invalid_post_data_empty_fields() {
    let (server, db) = create_test_server().await;
    create_board(&db, "Django", "Django board.").await;
    create_user(&db, "john", "password123").await;
    let cookie = login(&server, "john", "password123").await;

    let response = server
        .post("/boards/1/new/")
        .add_header(COOKIE, cookie)
        .form(&[("subject", ""), ("message", "")])
        .await;

    response.assert_status_ok();

    let topic_repo = TopicRepository::new(db.pool());
    let post_repo = PostRepository::new(db.pool());
    assert_eq!(topic_repo.count().await.unwrap(), 0);
    assert_eq!(post_repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_new_topic_whitespace_only_fields_rejected() {
    let (server, db) = create_test_server().await;
    create_board(&db, "Django", "Django board.").await;
    create_user(&db, "john", "password123").await;
    let cookie = login(&server, "john", "password123").await;

    let response = server
        .post("/boards/1/new/")
        .add_header(COOKIE, cookie)
        .form(&[("subject", "   "), ("message", "\t")])
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("This field is required."));

    let topic_repo = TopicRepository::new(db.pool());
    assert_eq!(topic_repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_new_topic_invalid_data_keeps_submitted_values() {
    let (server, db) = create_test_server().await;
    create_board(&db, "Django", "Django board.").await;
    create_user(&db, "john", "password123").await;
    let cookie = login(&server, "john", "password123").await;

    let response = server
        .post("/boards/1/new/")
        .add_header(COOKIE, cookie)
        .form(&[("subject", "Kept subject"), ("message", "")])
        .await;

    response.assert_status_ok();
    let body = response.text();
    // The bound form is re-rendered with the submitted subject intact
    assert!(body.contains("Kept subject"));
    assert!(body.contains("This field is required."));
}

#[tokio::test]
async fn test_new_topic_post_to_missing_board_writes_nothing() {
    let (server, db) = create_test_server().await;
    create_board(&db, "Django", "Django board.").await;
    create_user(&db, "john", "password123").await;
    let cookie = login(&server, "john", "password123").await;

    let response = server
        .post("/boards/99/new/")
        .add_header(COOKIE, cookie)
        .form(&[("subject", "Test title"), ("message", "Lorem ipsum")])
        .await;

    response.assert_status(StatusCode::NOT_FOUND);

    let topic_repo = TopicRepository::new(db.pool());
    let post_repo = PostRepository::new(db.pool());
    assert_eq!(topic_repo.count().await.unwrap(), 0);
    assert_eq!(post_repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_anonymous_get_redirects_to_login_with_next() {
    let (server, db) = create_test_server().await;
    create_board(&db, "Django", "Django board.").await;

    let response = server.get("/boards/1/new/").await;

    assert!(response.status_code().is_redirection());
    let location = response
        .headers()
        .get(LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .unwrap();
    assert_eq!(location, "/login?next=%2Fboards%2F1%2Fnew%2F");
}

#[tokio::test]
async fn test_anonymous_post_redirects_and_writes_nothing() {
    let (server, db) = create_test_server().await;
    create_board(&db, "Django", "Django board.").await;

    let response = server
        .post("/boards/1/new/")
        .form(&[("subject", "Test title"), ("message", "Lorem ipsum")])
        .await;

    assert!(response.status_code().is_redirection());

    let topic_repo = TopicRepository::new(db.pool());
    let post_repo = PostRepository::new(db.pool());
    assert_eq!(topic_repo.count().await.unwrap(), 0);
    assert_eq!(post_repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_topic_attributed_to_session_user() {
    let (server, db) = create_test_server().await;
    let board_id = create_board(&db, "Django", "Django board.").await;
    create_user(&db, "john", "password123").await;
    let jane_id = create_user(&db, "jane", "password456").await;
    let cookie = login(&server, "jane", "password456").await;

    server
        .post(&format!("/boards/{board_id}/new/"))
        .add_header(COOKIE, cookie)
        .form(&[("subject", "Jane's topic"), ("message", "hello")])
        .await;

    let topic_repo = TopicRepository::new(db.pool());
    let topic = topic_repo.get_by_id(1).await.unwrap().unwrap();
    assert_eq!(topic.starter_id, jane_id);

    let post_repo = PostRepository::new(db.pool());
    let posts = post_repo.list_by_topic(topic.id).await.unwrap();
    assert_eq!(posts[0].created_by, jane_id);
}

#[tokio::test]
async fn test_new_topic_trims_submitted_values() {
    let (server, db) = create_test_server().await;
    let board_id = create_board(&db, "Django", "Django board.").await;
    create_user(&db, "john", "password123").await;
    let cookie = login(&server, "john", "password123").await;

    let response = server
        .post(&format!("/boards/{board_id}/new/"))
        .add_header(COOKIE, cookie)
        .form(&[("subject", "  Test title  "), ("message", "  body  ")])
        .await;

    assert!(response.status_code().is_redirection());

    let topic_repo = TopicRepository::new(db.pool());
    let topic = topic_repo.get_by_id(1).await.unwrap().unwrap();
    assert_eq!(topic.subject, "Test title");
}
