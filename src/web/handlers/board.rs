//! Board page handlers.

use axum::{
    extract::{Path, State},
    response::Html,
};
use std::sync::Arc;

use crate::db::UserRepository;
use crate::forum::{ForumService, PostRepository, TopicRepository};
use crate::web::error::PageError;
use crate::web::handlers::AppState;
use crate::web::middleware::OptionalSessionUser;
use crate::web::pages::{self, TopicEntry};

/// GET / - Home page listing all boards.
pub async fn home(
    State(state): State<Arc<AppState>>,
    OptionalSessionUser(session): OptionalSessionUser,
) -> Result<Html<String>, PageError> {
    let service = ForumService::new(&state.db);
    let boards = service.list_boards().await?;

    let topic_repo = TopicRepository::new(state.db.pool());
    let mut rows = Vec::with_capacity(boards.len());
    for board in boards {
        let topic_count = topic_repo.count_by_board(board.id).await?;
        rows.push((board, topic_count));
    }

    let user = session.as_ref().map(|c| c.username.as_str());
    Ok(Html(pages::home_page(
        &state.forum_name,
        &state.forum_description,
        user,
        &rows,
    )))
}

/// GET /boards/:board_id/topics/ - Topic listing for a board.
pub async fn board_topics(
    State(state): State<Arc<AppState>>,
    OptionalSessionUser(session): OptionalSessionUser,
    Path(board_id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let service = ForumService::new(&state.db);
    let (board, topics) = service.board_topics(board_id).await?;

    let user_repo = UserRepository::new(state.db.pool());
    let post_repo = PostRepository::new(state.db.pool());

    let mut entries = Vec::with_capacity(topics.len());
    for topic in topics {
        let starter = user_repo
            .get_by_id(topic.starter_id)
            .await
            .ok()
            .flatten()
            .map(|u| u.username)
            .unwrap_or_else(|| "unknown".to_string());
        let post_count = post_repo.count_by_topic(topic.id).await?;

        entries.push(TopicEntry {
            topic,
            starter,
            post_count,
        });
    }

    let user = session.as_ref().map(|c| c.username.as_str());
    Ok(Html(pages::topics_page(
        &state.forum_name,
        &board,
        user,
        &entries,
    )))
}
