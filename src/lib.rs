//! Palaver - a small web discussion board.
//!
//! Boards contain topics, topics contain posts, and authentication gates
//! topic creation.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod forum;
pub mod logging;
pub mod web;

pub use auth::{authenticate, hash_password, validate_password, verify_password, PasswordError};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{PalaverError, Result};
pub use forum::{
    Board, ForumService, NewBoard, NewPost, NewTopic, NewTopicForm, Post, Topic,
};
pub use web::WebServer;
