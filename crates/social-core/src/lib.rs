//! # social-core
//!
//! Domain layer containing entities, value objects and the ports (repository and
//! identity-provider traits) the outer layers implement.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, FollowAction, Hashtag, Post, Role, StoredFile, User, VoteAction,
};
pub use error::DomainError;
pub use traits::{
    CommentRepository, FileRepository, HashtagRepository, IdentityProfile, IdentityProvider,
    PostQuery, PostRepository, RepoResult, UserRepository,
};
pub use value_objects::{extract_hashtags, normalize_tag, Snowflake, SnowflakeGenerator, SnowflakeParseError};
