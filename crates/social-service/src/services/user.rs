//! User service
//!
//! Handles profiles and the follow relation.

use social_core::entities::{FollowAction, User};
use social_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{BioResponse, FollowResponse, UpdateBioRequest, UserResponse, UserSummary};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get user entity by ID
    #[instrument(skip(self))]
    pub async fn get_user_entity(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }

    /// Get a user's profile
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self.get_user_entity(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Users following `user_id`
    #[instrument(skip(self))]
    pub async fn get_followers(&self, user_id: Snowflake) -> ServiceResult<Vec<UserSummary>> {
        let user = self.get_user_entity(user_id).await?;
        self.summaries(&user.followers).await
    }

    /// Users `user_id` follows
    #[instrument(skip(self))]
    pub async fn get_following(&self, user_id: Snowflake) -> ServiceResult<Vec<UserSummary>> {
        let user = self.get_user_entity(user_id).await?;
        self.summaries(&user.following).await
    }

    async fn summaries(&self, ids: &[Snowflake]) -> ServiceResult<Vec<UserSummary>> {
        let users = self.ctx.user_repo().find_by_ids(ids).await?;
        // keep the relation's order
        Ok(ids
            .iter()
            .filter_map(|id| users.iter().find(|u| u.id == *id))
            .map(UserSummary::from)
            .collect())
    }

    /// Set or clear the current user's bio
    #[instrument(skip(self, request))]
    pub async fn update_bio(
        &self,
        user_id: Snowflake,
        request: UpdateBioRequest,
    ) -> ServiceResult<BioResponse> {
        let mut user = self.get_user_entity(user_id).await?;
        user.set_bio(request.bio)?;
        self.ctx.user_repo().update_profile(&user).await?;

        info!(user_id = %user_id, "Bio updated");

        Ok(BioResponse {
            message: "Bio updated successfully".to_string(),
            bio: user.bio,
        })
    }

    /// Follow `target_id` if not yet following, otherwise unfollow.
    ///
    /// Both sides of the relation are checked before writing; if they disagree
    /// the call fails and nothing is written.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn toggle_follow(
        &self,
        actor: &User,
        target_id: Snowflake,
    ) -> ServiceResult<FollowResponse> {
        let target = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Other user not found"))?;

        let action = actor.follow_action(&target)?;
        self.ctx
            .user_repo()
            .apply_follow(actor.id, target.id, action)
            .await?;

        let message = match action {
            FollowAction::Follow => format!("{} started following {}", actor.id, target.id),
            FollowAction::Unfollow => format!("{} unfollowed {}", actor.id, target.id),
        };
        info!(target_id = %target.id, ?action, "Follow toggled");

        Ok(FollowResponse {
            message,
            response: action.delta(),
        })
    }
}
