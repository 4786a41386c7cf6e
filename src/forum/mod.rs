//! Forum module for Palaver.
//!
//! This module provides the discussion-board domain:
//! - Board, Topic, and Post models
//! - Repositories for each entity, including the transactional creation of
//!   a topic with its initiating post
//! - New-topic form validation
//! - A service layer combining lookups, validation, and writes

mod board;
mod board_repository;
mod form;
mod post;
mod post_repository;
mod service;
mod topic;
mod topic_repository;

pub use board::{Board, NewBoard};
pub use board_repository::BoardRepository;
pub use form::{FormErrors, NewTopicForm, MAX_MESSAGE_LENGTH, MAX_SUBJECT_LENGTH};
pub use post::{NewPost, Post};
pub use post_repository::PostRepository;
pub use service::ForumService;
pub use topic::{NewTopic, Topic};
pub use topic_repository::TopicRepository;
