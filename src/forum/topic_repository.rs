//! Topic repository for Palaver.
//!
//! This module provides read and create operations for topics, including the
//! transactional creation of a topic together with its initiating post.

use super::post::Post;
use super::topic::{NewTopic, Topic};
use crate::db::DbPool;
use crate::{PalaverError, Result};

/// Repository for topic operations.
pub struct TopicRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> TopicRepository<'a> {
    /// Create a new TopicRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a topic together with its first post in a single transaction.
    ///
    /// The post is attributed to the topic starter. Either both rows are
    /// written or neither is; a concurrent reader never observes a topic
    /// without its initiating post.
    pub async fn create_with_first_post(
        &self,
        new_topic: &NewTopic,
        message: &str,
    ) -> Result<(Topic, Post)> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PalaverError::Database(e.to_string()))?;

        let topic_id: i64 = sqlx::query_scalar(
            "INSERT INTO topics (board_id, subject, starter_id) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(new_topic.board_id)
        .bind(&new_topic.subject)
        .bind(new_topic.starter_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        let post_id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (topic_id, message, created_by) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(topic_id)
        .bind(message)
        .bind(new_topic.starter_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        let topic: TopicRow = sqlx::query_as(
            "SELECT id, board_id, subject, starter_id, created_at, updated_at
             FROM topics WHERE id = ?",
        )
        .bind(topic_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        let post: Post = sqlx::query_as(
            "SELECT id, topic_id, message, created_by, created_at FROM posts WHERE id = ?",
        )
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| PalaverError::Database(e.to_string()))?;

        Ok((topic.into_topic(), post))
    }

    /// Get a topic by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Topic>> {
        let result: Option<TopicRow> = sqlx::query_as(
            "SELECT id, board_id, subject, starter_id, created_at, updated_at
             FROM topics WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_topic()))
    }

    /// Get a topic by ID, constrained to the given board.
    ///
    /// Returns None when the topic doesn't exist or belongs to another board.
    pub async fn get_in_board(&self, id: i64, board_id: i64) -> Result<Option<Topic>> {
        let result: Option<TopicRow> = sqlx::query_as(
            "SELECT id, board_id, subject, starter_id, created_at, updated_at
             FROM topics WHERE id = ? AND board_id = ?",
        )
        .bind(id)
        .bind(board_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_topic()))
    }

    /// List topics in a board, most recently updated first.
    pub async fn list_by_board(&self, board_id: i64) -> Result<Vec<Topic>> {
        let rows: Vec<TopicRow> = sqlx::query_as(
            "SELECT id, board_id, subject, starter_id, created_at, updated_at
             FROM topics WHERE board_id = ? ORDER BY updated_at DESC, id DESC",
        )
        .bind(board_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.into_topic()).collect())
    }

    /// Count topics in a board.
    pub async fn count_by_board(&self, board_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM topics WHERE board_id = ?")
            .bind(board_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| PalaverError::Database(e.to_string()))?;
        Ok(count.0)
    }

    /// Count all topics.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM topics")
            .fetch_one(self.pool)
            .await
            .map_err(|e| PalaverError::Database(e.to_string()))?;
        Ok(count.0)
    }
}

/// Internal struct for mapping database rows to Topic.
#[derive(sqlx::FromRow)]
struct TopicRow {
    id: i64,
    board_id: i64,
    subject: String,
    starter_id: i64,
    created_at: String,
    updated_at: String,
}

impl TopicRow {
    fn into_topic(self) -> Topic {
        Topic {
            id: self.id,
            board_id: self.board_id,
            subject: self.subject,
            starter_id: self.starter_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
