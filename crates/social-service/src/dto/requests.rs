//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; most also implement `Validate`.

use serde::Deserialize;
use social_core::entities::{MAX_BIO_LENGTH, MAX_CAPTION_LENGTH, MAX_COMMENT_LENGTH};
use social_core::Snowflake;
use validator::Validate;

// `validator` length bounds are `u64`; mirror the core `usize` limits.
const MAX_BIO_LENGTH_U64: u64 = MAX_BIO_LENGTH as u64;
const MAX_CAPTION_LENGTH_U64: u64 = MAX_CAPTION_LENGTH as u64;
const MAX_COMMENT_LENGTH_U64: u64 = MAX_COMMENT_LENGTH as u64;

// ============================================================================
// Auth Requests
// ============================================================================

/// Google sign-in request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// Google ID token from the client
    #[serde(default)]
    pub token: Option<String>,
}

// ============================================================================
// User Requests
// ============================================================================

/// Profile bio update
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBioRequest {
    #[validate(length(max = MAX_BIO_LENGTH_U64, message = "Bio must be at most 200 characters"))]
    #[serde(default)]
    pub bio: Option<String>,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Caption update. Images are fixed once posted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(
        min = 1,
        max = MAX_CAPTION_LENGTH_U64,
        message = "Caption must be 1-2200 characters"
    ))]
    #[serde(default)]
    pub caption: String,

    #[serde(default)]
    pub image: Option<serde_json::Value>,

    #[serde(default)]
    pub images: Option<serde_json::Value>,
}

impl UpdatePostRequest {
    /// Whether the body tries to change the post's images
    pub fn touches_images(&self) -> bool {
        self.image.is_some() || self.images.is_some()
    }
}

/// Cursor pagination for post listings
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FeedQuery {
    /// Page size (1-100, default 50)
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,

    /// Only posts older than this ID
    pub before: Option<Snowflake>,
}

/// Hashtag search
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TagSearchQuery {
    #[serde(default)]
    pub search: Option<String>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// New comment on a post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(max = MAX_COMMENT_LENGTH_U64, message = "Comment must be at most 1000 characters"))]
    #[serde(default)]
    pub comment: Option<String>,
}
