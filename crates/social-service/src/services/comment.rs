//! Comment service

use social_core::entities::{Comment, User};
use social_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CommentBody, CommentResponse, CommentWithCreator, CreateCommentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on an existing post
    #[instrument(skip(self, author, request), fields(author_id = %author.id))]
    pub async fn create_comment(
        &self,
        author: &User,
        post_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentBody> {
        let comment = Comment::new(
            self.ctx.generate_id(),
            post_id,
            author.id,
            request.comment.unwrap_or_default(),
        )?;

        if self.ctx.post_repo().find_by_id(post_id).await?.is_none() {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        self.ctx.comment_repo().create(&comment).await?;
        info!(comment_id = %comment.id, post_id = %post_id, "Comment created");

        Ok(CommentBody {
            message: "Comment created successfully".to_string(),
            comment: CommentResponse::from(CommentWithCreator {
                comment: &comment,
                creator: Some(author),
            }),
        })
    }

    /// Delete a comment. Allowed for its author and the author of the post.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn delete_comment(&self, user: &User, comment_id: Snowflake) -> ServiceResult<()> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        let allowed = match self.ctx.post_repo().find_by_id(comment.post_id).await? {
            Some(post) => comment.can_be_deleted_by(user, &post),
            None => comment.created_by == user.id,
        };
        if !allowed {
            return Err(DomainError::NotAllowedToDeleteComment.into());
        }

        self.ctx.comment_repo().delete(comment_id).await?;
        info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }
}
