//! Comment entity - text attached to a post

use chrono::{DateTime, Utc};

use crate::entities::{Post, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum comment length in characters
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub created_by: Snowflake,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment. The body is trimmed and must not be empty.
    pub fn new(
        id: Snowflake,
        post_id: Snowflake,
        created_by: Snowflake,
        body: String,
    ) -> Result<Self, DomainError> {
        let body = body.trim().to_string();
        if body.is_empty() {
            return Err(DomainError::EmptyComment);
        }
        if body.chars().count() > MAX_COMMENT_LENGTH {
            return Err(DomainError::ContentTooLong {
                field: "comment",
                max: MAX_COMMENT_LENGTH,
            });
        }
        Ok(Self {
            id,
            post_id,
            created_by,
            body,
            created_at: Utc::now(),
        })
    }

    /// The author of the comment or the author of the post it sits on
    pub fn can_be_deleted_by(&self, user: &User, parent: &Post) -> bool {
        debug_assert_eq!(parent.id, self.post_id);
        self.created_by == user.id || parent.created_by == user.id
    }
}
