//! Post repository for Palaver.
//!
//! This module provides read and create operations for posts in the database.

use super::post::{NewPost, Post};
use crate::db::DbPool;
use crate::{PalaverError, Result};

/// Repository for post operations.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new post in the database.
    ///
    /// Returns the created post with the assigned ID. The topic's updated_at
    /// timestamp is touched in the same transaction.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PalaverError::Database(e.to_string()))?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (topic_id, message, created_by) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(new_post.topic_id)
        .bind(&new_post.message)
        .bind(new_post.created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        sqlx::query("UPDATE topics SET updated_at = datetime('now') WHERE id = ?")
            .bind(new_post.topic_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| PalaverError::Database(e.to_string()))?;

        let post: Post = sqlx::query_as(
            "SELECT id, topic_id, message, created_by, created_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| PalaverError::Database(e.to_string()))?;

        Ok(post)
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let result: Option<Post> = sqlx::query_as(
            "SELECT id, topic_id, message, created_by, created_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List posts in a topic, oldest first.
    pub async fn list_by_topic(&self, topic_id: i64) -> Result<Vec<Post>> {
        let posts: Vec<Post> = sqlx::query_as(
            "SELECT id, topic_id, message, created_by, created_at
             FROM posts WHERE topic_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(topic_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        Ok(posts)
    }

    /// Count posts in a topic.
    pub async fn count_by_topic(&self, topic_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE topic_id = ?")
            .bind(topic_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| PalaverError::Database(e.to_string()))?;
        Ok(count.0)
    }

    /// Count all posts.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await
            .map_err(|e| PalaverError::Database(e.to_string()))?;
        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::forum::{BoardRepository, NewBoard, NewTopic, TopicRepository};
    use crate::Database;

    async fn setup() -> (Database, i64, i64) {
        let db = Database::open_in_memory().await.unwrap();

        let user_id = UserRepository::new(db.pool())
            .create(&NewUser::new("testuser", "hash"))
            .await
            .unwrap()
            .id;
        let board_id = BoardRepository::new(db.pool())
            .create(&NewBoard::new("test-board"))
            .await
            .unwrap()
            .id;
        let (topic, _) = TopicRepository::new(db.pool())
            .create_with_first_post(&NewTopic::new(board_id, "Test title", user_id), "first")
            .await
            .unwrap();

        (db, topic.id, user_id)
    }

    #[tokio::test]
    async fn test_create_post() {
        let (db, topic_id, user_id) = setup().await;
        let repo = PostRepository::new(db.pool());

        let post = repo
            .create(&NewPost::new(topic_id, "a reply", user_id))
            .await
            .unwrap();

        assert_eq!(post.topic_id, topic_id);
        assert_eq!(post.message, "a reply");
        assert_eq!(post.created_by, user_id);
    }

    #[tokio::test]
    async fn test_create_post_unknown_topic() {
        let (db, _, user_id) = setup().await;
        let repo = PostRepository::new(db.pool());

        let result = repo.create(&NewPost::new(999, "orphan", user_id)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let (db, topic_id, user_id) = setup().await;
        let repo = PostRepository::new(db.pool());

        let created = repo
            .create(&NewPost::new(topic_id, "a reply", user_id))
            .await
            .unwrap();

        let found = repo.get_by_id(created.id).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().message, "a reply");

        let not_found = repo.get_by_id(999).await.unwrap();
        assert!(not_found.is_none());
    }

    #[tokio::test]
    async fn test_list_by_topic_oldest_first() {
        let (db, topic_id, user_id) = setup().await;
        let repo = PostRepository::new(db.pool());

        repo.create(&NewPost::new(topic_id, "second", user_id))
            .await
            .unwrap();
        repo.create(&NewPost::new(topic_id, "third", user_id))
            .await
            .unwrap();

        let posts = repo.list_by_topic(topic_id).await.unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].message, "first");
        assert_eq!(posts[1].message, "second");
        assert_eq!(posts[2].message, "third");
    }

    #[tokio::test]
    async fn test_count_by_topic() {
        let (db, topic_id, user_id) = setup().await;
        let repo = PostRepository::new(db.pool());

        assert_eq!(repo.count_by_topic(topic_id).await.unwrap(), 1);

        repo.create(&NewPost::new(topic_id, "a reply", user_id))
            .await
            .unwrap();

        assert_eq!(repo.count_by_topic(topic_id).await.unwrap(), 2);
        assert_eq!(repo.count_by_topic(999).await.unwrap(), 0);
    }
}
