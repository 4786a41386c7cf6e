//! Forum service for Palaver.
//!
//! High-level operations over boards, topics, and posts. Handlers use this
//! layer for the flows that combine lookups, validation, and writes.

use crate::{Database, PalaverError, Result};

use super::board_repository::BoardRepository;
use super::form::NewTopicForm;
use super::post::Post;
use super::post_repository::PostRepository;
use super::topic::{NewTopic, Topic};
use super::topic_repository::TopicRepository;
use super::Board;

/// Service for forum operations.
pub struct ForumService<'a> {
    db: &'a Database,
}

impl<'a> ForumService<'a> {
    /// Create a new ForumService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List all boards.
    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        let repo = BoardRepository::new(self.db.pool());
        repo.list_all().await
    }

    /// Get a board by ID.
    ///
    /// Returns an error if the board doesn't exist.
    pub async fn board(&self, board_id: i64) -> Result<Board> {
        let repo = BoardRepository::new(self.db.pool());
        repo.get_by_id(board_id)
            .await?
            .ok_or_else(|| PalaverError::NotFound("board".to_string()))
    }

    /// Get a board together with its topics, most recently updated first.
    pub async fn board_topics(&self, board_id: i64) -> Result<(Board, Vec<Topic>)> {
        let board = self.board(board_id).await?;

        let repo = TopicRepository::new(self.db.pool());
        let topics = repo.list_by_board(board_id).await?;

        Ok((board, topics))
    }

    /// Get a topic in a board together with its posts, oldest post first.
    ///
    /// Returns a not-found error when the board doesn't exist or the topic
    /// doesn't belong to it.
    pub async fn topic_with_posts(
        &self,
        board_id: i64,
        topic_id: i64,
    ) -> Result<(Board, Topic, Vec<Post>)> {
        let board = self.board(board_id).await?;

        let topic = TopicRepository::new(self.db.pool())
            .get_in_board(topic_id, board_id)
            .await?
            .ok_or_else(|| PalaverError::NotFound("topic".to_string()))?;

        let posts = PostRepository::new(self.db.pool())
            .list_by_topic(topic.id)
            .await?;

        Ok((board, topic, posts))
    }

    /// Start a new topic in a board from validated form data.
    ///
    /// The topic and its first post are created as a single unit, attributed
    /// to the starter. Fails with a not-found error when the board doesn't
    /// exist and a validation error when the form is invalid; nothing is
    /// written in either case.
    pub async fn start_topic(
        &self,
        board_id: i64,
        starter_id: i64,
        form: &NewTopicForm,
    ) -> Result<(Topic, Post)> {
        let board = self.board(board_id).await?;

        if let Err(errors) = form.check() {
            let first = errors
                .iter()
                .next()
                .and_then(|(field, messages)| {
                    messages.first().map(|m| format!("{field}: {m}"))
                })
                .unwrap_or_else(|| "invalid form".to_string());
            return Err(PalaverError::Validation(first));
        }

        let new_topic = NewTopic::new(board.id, form.subject_trimmed(), starter_id);
        let repo = TopicRepository::new(self.db.pool());
        repo.create_with_first_post(&new_topic, form.message_trimmed())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::forum::{NewBoard, PostRepository};

    async fn setup() -> (Database, i64, i64) {
        let db = Database::open_in_memory().await.unwrap();

        let board_id = BoardRepository::new(db.pool())
            .create(&NewBoard::new("Django").with_description("Django board."))
            .await
            .unwrap()
            .id;
        let user_id = UserRepository::new(db.pool())
            .create(&NewUser::new("john", "hash"))
            .await
            .unwrap()
            .id;

        (db, board_id, user_id)
    }

    #[tokio::test]
    async fn test_board_found() {
        let (db, board_id, _) = setup().await;
        let service = ForumService::new(&db);

        let board = service.board(board_id).await.unwrap();
        assert_eq!(board.name, "Django");
    }

    #[tokio::test]
    async fn test_board_not_found() {
        let (db, _, _) = setup().await;
        let service = ForumService::new(&db);

        let result = service.board(99).await;
        assert!(matches!(result, Err(PalaverError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_start_topic_creates_topic_and_post() {
        let (db, board_id, user_id) = setup().await;
        let service = ForumService::new(&db);

        let form = NewTopicForm::new("Test title", "Lorem ipsum dolor sit amet");
        let (topic, post) = service.start_topic(board_id, user_id, &form).await.unwrap();

        assert_eq!(topic.subject, "Test title");
        assert_eq!(topic.starter_id, user_id);
        assert_eq!(post.message, "Lorem ipsum dolor sit amet");
        assert_eq!(post.created_by, user_id);
        assert_eq!(post.topic_id, topic.id);
    }

    #[tokio::test]
    async fn test_start_topic_trims_input() {
        let (db, board_id, user_id) = setup().await;
        let service = ForumService::new(&db);

        let form = NewTopicForm::new("  Test title  ", "  body  ");
        let (topic, post) = service.start_topic(board_id, user_id, &form).await.unwrap();

        assert_eq!(topic.subject, "Test title");
        assert_eq!(post.message, "body");
    }

    #[tokio::test]
    async fn test_start_topic_invalid_form_writes_nothing() {
        let (db, board_id, user_id) = setup().await;
        let service = ForumService::new(&db);

        let form = NewTopicForm::new("", "");
        let result = service.start_topic(board_id, user_id, &form).await;
        assert!(matches!(result, Err(PalaverError::Validation(_))));

        assert_eq!(TopicRepository::new(db.pool()).count().await.unwrap(), 0);
        assert_eq!(PostRepository::new(db.pool()).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_start_topic_unknown_board_writes_nothing() {
        let (db, _, user_id) = setup().await;
        let service = ForumService::new(&db);

        let form = NewTopicForm::new("Test title", "body");
        let result = service.start_topic(99, user_id, &form).await;
        assert!(matches!(result, Err(PalaverError::NotFound(_))));

        assert_eq!(TopicRepository::new(db.pool()).count().await.unwrap(), 0);
        assert_eq!(PostRepository::new(db.pool()).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_board_topics() {
        let (db, board_id, user_id) = setup().await;
        let service = ForumService::new(&db);

        let form = NewTopicForm::new("Test title", "body");
        service.start_topic(board_id, user_id, &form).await.unwrap();

        let (board, topics) = service.board_topics(board_id).await.unwrap();
        assert_eq!(board.id, board_id);
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].subject, "Test title");
    }

    #[tokio::test]
    async fn test_topic_with_posts() {
        let (db, board_id, user_id) = setup().await;
        let service = ForumService::new(&db);

        let form = NewTopicForm::new("Test title", "Lorem ipsum dolor sit amet");
        let (topic, _) = service.start_topic(board_id, user_id, &form).await.unwrap();

        let (board, found, posts) = service
            .topic_with_posts(board_id, topic.id)
            .await
            .unwrap();
        assert_eq!(board.id, board_id);
        assert_eq!(found.id, topic.id);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].message, "Lorem ipsum dolor sit amet");
    }

    #[tokio::test]
    async fn test_topic_with_posts_wrong_board() {
        let (db, board_id, user_id) = setup().await;
        let service = ForumService::new(&db);

        let other_board = BoardRepository::new(db.pool())
            .create(&NewBoard::new("Other"))
            .await
            .unwrap();

        let form = NewTopicForm::new("Test title", "body");
        let (topic, _) = service.start_topic(board_id, user_id, &form).await.unwrap();

        let result = service.topic_with_posts(other_board.id, topic.id).await;
        assert!(matches!(result, Err(PalaverError::NotFound(_))));
    }
}
