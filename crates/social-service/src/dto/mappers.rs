//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use social_core::entities::{Comment, Post, User};

use super::responses::{CommentResponse, PostResponse, UserResponse, UserSummary};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
            role: user.role.as_str().to_string(),
            followers: user.followers.iter().map(ToString::to_string).collect(),
            following: user.following.iter().map(ToString::to_string).collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

/// Comment with its (possibly missing) author
#[derive(Debug, Clone, Copy)]
pub struct CommentWithCreator<'a> {
    pub comment: &'a Comment,
    pub creator: Option<&'a User>,
}

impl From<CommentWithCreator<'_>> for CommentResponse {
    fn from(c: CommentWithCreator<'_>) -> Self {
        Self {
            id: c.comment.id.to_string(),
            post_id: c.comment.post_id.to_string(),
            body: c.comment.body.clone(),
            created_by: c.creator.map(UserSummary::from),
            created_at: c.comment.created_at,
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

/// Post plus everything its response embeds
#[derive(Debug, Clone)]
pub struct PostWithDetails<'a> {
    pub post: &'a Post,
    pub creator: Option<&'a User>,
    pub comments: Vec<CommentWithCreator<'a>>,
}

impl From<PostWithDetails<'_>> for PostResponse {
    fn from(details: PostWithDetails<'_>) -> Self {
        let post = details.post;
        Self {
            id: post.id.to_string(),
            caption: post.caption.clone(),
            images: post.images.clone(),
            created_by: details.creator.map(UserSummary::from),
            tags: post.tags.clone(),
            votes: post.votes.iter().map(ToString::to_string).collect(),
            vote_count: post.vote_count(),
            is_blacklisted: post.is_blacklisted,
            comments: details
                .comments
                .into_iter()
                .map(CommentResponse::from)
                .collect(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
