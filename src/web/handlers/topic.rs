//! Topic page handlers: the new-topic flow and topic detail.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;

use crate::db::UserRepository;
use crate::forum::{ForumService, NewTopicForm};
use crate::web::error::PageError;
use crate::web::handlers::AppState;
use crate::web::middleware::{OptionalSessionUser, SessionUser};
use crate::web::pages::{self, PostEntry};

/// Fresh token for the CSRF hidden field.
fn csrf_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// GET /boards/:board_id/new/ - Show the empty new-topic form.
///
/// Requires a session; the board must exist. The page carries a CSRF token
/// field and a link back to the board's topic listing.
pub async fn new_topic_form(
    State(state): State<Arc<AppState>>,
    SessionUser(claims): SessionUser,
    Path(board_id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let service = ForumService::new(&state.db);
    let board = service.board(board_id).await?;

    let form = NewTopicForm::default();
    Ok(Html(pages::new_topic_page(
        &state.forum_name,
        &board,
        &form,
        &Default::default(),
        &csrf_token(),
        Some(&claims.username),
    )))
}

/// POST /boards/:board_id/new/ - Create a topic from submitted form data.
///
/// Invalid data re-renders the form with field errors (200, nothing
/// persisted). Valid data creates the topic and its first post as one unit,
/// attributed to the session user, then redirects to the topic page.
pub async fn new_topic_submit(
    State(state): State<Arc<AppState>>,
    SessionUser(claims): SessionUser,
    Path(board_id): Path<i64>,
    Form(form): Form<NewTopicForm>,
) -> Result<Response, PageError> {
    let service = ForumService::new(&state.db);
    let board = service.board(board_id).await?;

    if let Err(errors) = form.check() {
        return Ok(Html(pages::new_topic_page(
            &state.forum_name,
            &board,
            &form,
            &errors,
            &csrf_token(),
            Some(&claims.username),
        ))
        .into_response());
    }

    let (topic, _post) = service.start_topic(board.id, claims.sub, &form).await?;

    tracing::info!(
        board_id = board.id,
        topic_id = topic.id,
        username = %claims.username,
        "Topic created"
    );

    Ok(Redirect::to(&format!("/boards/{}/topics/{}/", board.id, topic.id)).into_response())
}

/// GET /boards/:board_id/topics/:topic_id/ - Topic detail with its posts.
pub async fn topic_detail(
    State(state): State<Arc<AppState>>,
    OptionalSessionUser(session): OptionalSessionUser,
    Path((board_id, topic_id)): Path<(i64, i64)>,
) -> Result<Html<String>, PageError> {
    let service = ForumService::new(&state.db);
    let (board, topic, posts) = service.topic_with_posts(board_id, topic_id).await?;

    let user_repo = UserRepository::new(state.db.pool());
    let mut entries = Vec::with_capacity(posts.len());
    for post in posts {
        let author = user_repo
            .get_by_id(post.created_by)
            .await
            .ok()
            .flatten()
            .map(|u| u.username)
            .unwrap_or_else(|| "unknown".to_string());
        entries.push(PostEntry { post, author });
    }

    let user = session.as_ref().map(|c| c.username.as_str());
    Ok(Html(pages::topic_page(
        &state.forum_name,
        &board,
        &topic,
        &entries,
        user,
    )))
}
