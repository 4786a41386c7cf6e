//! Test helpers for web integration tests.

use std::sync::Arc;

use axum::http::header::SET_COOKIE;
use axum_test::TestServer;

use palaver::db::{NewUser, UserRepository};
use palaver::forum::{BoardRepository, NewBoard};
use palaver::web::handlers::AppState;
use palaver::web::middleware::SessionState;
use palaver::web::router::{create_health_router, create_router};
use palaver::Database;

/// Session secret used by all test servers.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let app_state = Arc::new(
        AppState::new(db.clone(), TEST_SECRET, 3600)
            .with_forum_info("Palaver", "A small discussion board"),
    );
    let session_state = Arc::new(SessionState::new(TEST_SECRET));

    let router = create_router(app_state, session_state).merge(create_health_router());
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// Create a board in the database and return its ID.
pub async fn create_board(db: &Database, name: &str, description: &str) -> i64 {
    let repo = BoardRepository::new(db.pool());
    repo.create(&NewBoard::new(name).with_description(description))
        .await
        .expect("Failed to create test board")
        .id
}

/// Create a user with the given credentials and return their ID.
pub async fn create_user(db: &Database, username: &str, password: &str) -> i64 {
    let hash = palaver::hash_password(password).expect("Failed to hash password");
    let repo = UserRepository::new(db.pool());
    repo.create(&NewUser::new(username, hash))
        .await
        .expect("Failed to create test user")
        .id
}

/// Log in through the login endpoint and return the session cookie pair
/// (`session=<token>`) for use in a Cookie header.
pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/login")
        .form(&[("username", username), ("password", password), ("next", "/")])
        .await;

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .expect("session cookie should be valid UTF-8")
        .to_string();

    set_cookie
        .split(';')
        .next()
        .expect("cookie header should have a name=value pair")
        .to_string()
}
