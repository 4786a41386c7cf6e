//! Board repository for Palaver.
//!
//! This module provides CRUD operations for boards in the database.

use super::board::{Board, NewBoard};
use crate::db::DbPool;
use crate::{PalaverError, Result};

/// Repository for board CRUD operations.
pub struct BoardRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> BoardRepository<'a> {
    /// Create a new BoardRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new board in the database.
    ///
    /// Returns the created board with the assigned ID.
    pub async fn create(&self, new_board: &NewBoard) -> Result<Board> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO boards (name, description) VALUES (?, ?) RETURNING id",
        )
        .bind(&new_board.name)
        .bind(&new_board.description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| PalaverError::NotFound("board".to_string()))
    }

    /// Get a board by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Board>> {
        let result: Option<BoardRow> = sqlx::query_as(
            "SELECT id, name, description, created_at FROM boards WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_board()))
    }

    /// Get a board by name.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Board>> {
        let result: Option<BoardRow> = sqlx::query_as(
            "SELECT id, name, description, created_at FROM boards WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_board()))
    }

    /// List all boards, ordered by name.
    pub async fn list_all(&self) -> Result<Vec<Board>> {
        let rows: Vec<BoardRow> = sqlx::query_as(
            "SELECT id, name, description, created_at FROM boards ORDER BY name ASC, id ASC",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| PalaverError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.into_board()).collect())
    }

    /// Count all boards.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM boards")
            .fetch_one(self.pool)
            .await
            .map_err(|e| PalaverError::Database(e.to_string()))?;
        Ok(count.0)
    }

    /// Check if a board name is already taken.
    pub async fn name_exists(&self, name: &str) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM boards WHERE name = ?)")
                .bind(name)
                .fetch_one(self.pool)
                .await
                .map_err(|e| PalaverError::Database(e.to_string()))?;
        Ok(exists.0)
    }
}

/// Internal struct for mapping database rows to Board.
#[derive(sqlx::FromRow)]
struct BoardRow {
    id: i64,
    name: String,
    description: String,
    created_at: String,
}

impl BoardRow {
    fn into_board(self) -> Board {
        Board {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        }
    }
}
