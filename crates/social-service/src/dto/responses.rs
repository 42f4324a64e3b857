//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Success envelope: `{ "status": "success", ...body }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    #[serde(flatten)]
    pub body: T,
}

impl<T> ApiResponse<T> {
    pub fn success(body: T) -> Self {
        Self {
            status: "success",
            body,
        }
    }
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Login result: the session token and the signed-in user
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

// ============================================================================
// User Responses
// ============================================================================

/// Minimal user card embedded in posts, comments and follow lists
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub avatar: Option<String>,
}

/// Full user profile
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub role: String,
    pub followers: Vec<String>,
    pub following: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct FollowersResponse {
    pub followers: Vec<UserSummary>,
}

#[derive(Debug, Serialize)]
pub struct FollowingResponse {
    pub following: Vec<UserSummary>,
}

/// Bio update acknowledgement
#[derive(Debug, Serialize)]
pub struct BioResponse {
    pub message: String,
    pub bio: Option<String>,
}

/// Follow toggle result; `response` is 1 for follow, -1 for unfollow
#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub message: String,
    pub response: i8,
}

// ============================================================================
// Post Responses
// ============================================================================

/// Post with its creator and comments
#[derive(Debug, Clone, Serialize)]
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PostBody {
    pub post: PostResponse,
}

/// Post listing: `results` is the number of posts returned
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub results: usize,
    pub posts: Vec<PostResponse>,
}

impl From<Vec<PostResponse>> for PostListResponse {
    fn from(posts: Vec<PostResponse>) -> Self {
        Self {
            results: posts.len(),
            posts,
        }
    }
}

/// Vote toggle result
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub message: String,
    pub voted: bool,
    pub votes: usize,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub body: String,
    pub created_by: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CommentBody {
    pub message: String,
    pub comment: CommentResponse,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let label = |ok: bool| if ok { "healthy" } else { "unhealthy" }.to_string();
        Self {
            status: if database_healthy && redis_healthy {
                "ready"
            } else {
                "not_ready"
            }
            .to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: label(database_healthy),
                redis: label(redis_healthy),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
