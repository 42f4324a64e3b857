//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Comment, FollowAction, Hashtag, Post, StoredFile, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Fetch several users, in no particular order. Unknown IDs are skipped.
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Update profile fields (names, avatar, bio)
    async fn update_profile(&self, user: &User) -> RepoResult<()>;

    /// Write both sides of a follow relation: `follower.following` and
    /// `followee.followers`.
    async fn apply_follow(
        &self,
        follower: Snowflake,
        followee: Snowflake,
        action: FollowAction,
    ) -> RepoResult<()>;
}

// ============================================================================
// Post Repository
// ============================================================================

/// Query parameters for listing posts, newest first
#[derive(Debug, Clone)]
pub struct PostQuery {
    /// Restrict to one creator
    pub created_by: Option<Snowflake>,
    /// Include blacklisted posts
    pub include_blacklisted: bool,
    /// Only posts older than this ID
    pub before: Option<Snowflake>,
    /// Max results
    pub limit: i64,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            created_by: None,
            include_blacklisted: false,
            before: None,
            limit: 50,
        }
    }
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// List posts matching the query, newest first
    async fn list(&self, query: PostQuery) -> RepoResult<Vec<Post>>;

    /// Fetch posts by ID, newest first
    async fn find_by_ids(&self, ids: &[Snowflake], include_blacklisted: bool)
        -> RepoResult<Vec<Post>>;

    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Persist caption and tags
    async fn update_caption(&self, post: &Post) -> RepoResult<()>;

    /// Set or clear the blacklist flag
    async fn set_blacklisted(&self, id: Snowflake, blacklisted: bool) -> RepoResult<()>;

    /// Add a vote (no-op if the user already voted). Returns the vote count
    /// after the write.
    async fn add_vote(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<usize>;

    /// Remove a vote (no-op if absent). Returns the vote count after the write.
    async fn remove_vote(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<usize>;

    /// Delete a post
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Comments on the given posts, oldest first
    async fn find_by_posts(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Delete every comment on a post, returning how many were removed
    async fn delete_by_post(&self, post_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Hashtag Repository
// ============================================================================

#[async_trait]
pub trait HashtagRepository: Send + Sync {
    /// Find a tag by its normalized name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Hashtag>>;

    /// Append a post to a tag, creating the tag if needed
    async fn attach_post(&self, name: &str, post_id: Snowflake) -> RepoResult<()>;

    /// Remove a post from one tag
    async fn detach_post(&self, name: &str, post_id: Snowflake) -> RepoResult<()>;

    /// Remove a post from every tag
    async fn detach_post_everywhere(&self, post_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// File Repository (binary object store)
// ============================================================================

#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Store a file; the filename must be unused
    async fn store(&self, file: &StoredFile) -> RepoResult<()>;

    /// Load a file by name
    async fn find_by_filename(&self, filename: &str) -> RepoResult<Option<StoredFile>>;

    /// Delete a file by name
    async fn delete(&self, filename: &str) -> RepoResult<()>;
}
