//! Vote service

use social_core::entities::{User, VoteAction};
use social_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::VoteResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add the user's vote to a post, or remove it if already present
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn toggle_vote(&self, user: &User, post_id: Snowflake) -> ServiceResult<VoteResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Associated Post not found"))?;

        // The count comes from the write itself, so racing toggles still
        // report what was stored
        let action = post.vote_action(user.id);
        let votes = match action {
            VoteAction::Add => self.ctx.post_repo().add_vote(post_id, user.id).await?,
            VoteAction::Remove => self.ctx.post_repo().remove_vote(post_id, user.id).await?,
        };

        info!(post_id = %post_id, ?action, votes, "Vote toggled");

        Ok(VoteResponse {
            message: "Post updated successfully".to_string(),
            voted: action == VoteAction::Add,
            votes,
        })
    }
}
