//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateCommentRequest, FeedQuery, LoginRequest, TagSearchQuery, UpdateBioRequest,
    UpdatePostRequest,
};

// Re-export commonly used response types
pub use responses::{
    ApiResponse, AuthResponse, BioResponse, CommentBody, CommentResponse, FollowResponse,
    FollowersResponse, FollowingResponse, HealthChecks, HealthResponse, MessageResponse,
    PostBody, PostListResponse, PostResponse, ReadinessResponse, UserBody, UserResponse,
    UserSummary, VoteResponse,
};

// Re-export mapper helper structs
pub use mappers::{CommentWithCreator, PostWithDetails};
