//! Test fixtures and response shapes
//!
//! Minimal deserialization targets for the JSON the API returns.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A hashtag no other test run will have used
pub fn unique_tag(prefix: &str) -> String {
    format!("{prefix}{}x{}", std::process::id(), unique_suffix())
}

/// Google sign-in body
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CaptionUpdate {
    pub caption: String,
}

#[derive(Debug, Serialize)]
pub struct BioUpdate {
    pub bio: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewComment {
    pub comment: String,
}

/// User card embedded in posts, comments and follow lists
#[derive(Debug, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub avatar: Option<String>,
}

/// Full profile
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub bio: Option<String>,
    pub role: String,
    pub followers: Vec<String>,
    pub following: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserBody {
    pub status: String,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct FollowersBody {
    pub followers: Vec<UserSummary>,
}

#[derive(Debug, Deserialize)]
pub struct FollowingBody {
    pub following: Vec<UserSummary>,
}

#[derive(Debug, Deserialize)]
pub struct FollowBody {
    pub message: String,
    pub response: i8,
}

#[derive(Debug, Deserialize)]
pub struct BioBody {
    pub message: String,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub body: String,
    pub created_by: Option<UserSummary>,
}

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub message: String,
    pub comment: CommentResponse,
}

#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub caption: String,
    pub images: Vec<String>,
    pub created_by: Option<UserSummary>,
    pub tags: Vec<String>,
    pub votes: Vec<String>,
    pub vote_count: usize,
    pub is_blacklisted: bool,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Deserialize)]
pub struct PostBody {
    pub status: String,
    pub post: PostResponse,
}

#[derive(Debug, Deserialize)]
pub struct PostListBody {
    pub status: String,
    pub results: usize,
    pub posts: Vec<PostResponse>,
}

#[derive(Debug, Deserialize)]
pub struct VoteBody {
    pub message: String,
    pub voted: bool,
    pub votes: usize,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub status: String,
    pub message: String,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
