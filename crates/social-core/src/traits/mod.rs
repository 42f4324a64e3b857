//! Ports implemented by the infrastructure crates

mod identity;
mod repositories;

pub use identity::{IdentityProfile, IdentityProvider};
pub use repositories::{
    CommentRepository, FileRepository, HashtagRepository, PostQuery, PostRepository, RepoResult,
    UserRepository,
};
