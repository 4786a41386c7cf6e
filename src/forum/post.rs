//! Post model for Palaver.

/// Post entity representing a message in a topic.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// ID of the topic this post belongs to.
    pub topic_id: i64,
    /// Post message body.
    pub message: String,
    /// ID of the user who wrote the post.
    pub created_by: i64,
    /// Post creation timestamp.
    pub created_at: String,
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// ID of the topic to post in.
    pub topic_id: i64,
    /// Post message body.
    pub message: String,
    /// ID of the user writing the post.
    pub created_by: i64,
}

impl NewPost {
    /// Create a new post with required fields.
    pub fn new(topic_id: i64, message: impl Into<String>, created_by: i64) -> Self {
        Self {
            topic_id,
            message: message.into(),
            created_by,
        }
    }
}
