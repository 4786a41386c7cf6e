//! Topic model for Palaver.

/// Topic entity representing a discussion thread in a board.
#[derive(Debug, Clone)]
pub struct Topic {
    /// Unique topic ID.
    pub id: i64,
    /// ID of the board this topic belongs to.
    pub board_id: i64,
    /// Topic subject line.
    pub subject: String,
    /// ID of the user who started the topic.
    pub starter_id: i64,
    /// Topic creation timestamp.
    pub created_at: String,
    /// Last update timestamp (when a new post was added).
    pub updated_at: String,
}

/// Data for creating a new topic.
#[derive(Debug, Clone)]
pub struct NewTopic {
    /// ID of the board to create the topic in.
    pub board_id: i64,
    /// Topic subject line.
    pub subject: String,
    /// ID of the user starting the topic.
    pub starter_id: i64,
}

impl NewTopic {
    /// Create a new topic with required fields.
    pub fn new(board_id: i64, subject: impl Into<String>, starter_id: i64) -> Self {
        Self {
            board_id,
            subject: subject.into(),
            starter_id,
        }
    }
}
