//! # social-service
//!
//! Application layer containing business logic, services, DTOs and the
//! upload pipeline.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, CommentService, ImageProcessor, ImageUpload, MediaService, PostService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService, VoteService,
};

// Re-export DTOs for convenience
pub use dto::*;
