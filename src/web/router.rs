//! Router configuration for the Palaver web front end.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    board_topics, home, login, login_form, logout, new_topic_form, new_topic_submit,
    topic_detail, AppState,
};
use super::middleware::{session_layer, SessionState};

/// Create the main page router.
pub fn create_router(app_state: Arc<AppState>, session_state: Arc<SessionState>) -> Router {
    // Clone session_state for the middleware closure
    let session_state_for_middleware = session_state.clone();

    Router::new()
        .route("/", get(home))
        .route("/login", get(login_form).post(login))
        .route("/logout", post(logout))
        .route("/boards/:board_id/topics/", get(board_topics))
        .route(
            "/boards/:board_id/new/",
            get(new_topic_form).post(new_topic_submit),
        )
        .route("/boards/:board_id/topics/:topic_id/", get(topic_detail))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(move |req, next| {
                    let state = session_state_for_middleware.clone();
                    session_layer(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }
}
