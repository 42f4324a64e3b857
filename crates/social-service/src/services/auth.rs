//! Authentication service
//!
//! Handles Google sign-in, token verification and logout.

use social_common::{AppError, Claims};
use social_core::entities::User;
use social_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Exchange a Google ID token for a session token.
    ///
    /// The user is looked up by email and created on first sign-in.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let id_token = request
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or(AppError::MissingIdentityToken)?;

        let profile = self.ctx.identity_provider().verify(&id_token).await?;

        let user = match self.ctx.user_repo().find_by_email(&profile.email).await? {
            Some(user) => user,
            None => {
                let mut user = User::new(
                    self.ctx.generate_id(),
                    profile.email,
                    profile.given_name,
                    profile.family_name,
                );
                user.avatar = profile.picture;

                match self.ctx.user_repo().create(&user).await {
                    Ok(()) => {
                        info!(user_id = %user.id, "User created on first sign-in");
                        user
                    }
                    // Lost a race with a concurrent first sign-in
                    Err(DomainError::EmailAlreadyExists) => self
                        .ctx
                        .user_repo()
                        .find_by_email(&user.email)
                        .await?
                        .ok_or_else(|| ServiceError::internal("user vanished after conflict"))?,
                    Err(e) => return Err(e.into()),
                }
            }
        };

        let token = self.ctx.jwt_service().issue_token(user.id, user.role)?;

        info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse {
            token,
            user: UserResponse::from(&user),
        })
    }

    /// Resolve a bearer token to its claims and the current user
    #[instrument(skip_all)]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<(User, Claims)> {
        let claims = self.ctx.jwt_service().decode_token(token)?;

        if let Some(denylist) = self.ctx.token_denylist() {
            let revoked = denylist
                .is_revoked(&claims.jti)
                .await
                .map_err(|e| AppError::Cache(e.to_string()))?;
            if revoked {
                return Err(AppError::TokenRevoked.into());
            }
        }

        let user_id = claims.user_id()?;
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UnknownUser)?;

        Ok((user, claims))
    }

    /// Revoke the presented token, if any, for the rest of its lifetime.
    ///
    /// Invalid or expired tokens need no revocation and are ignored.
    #[instrument(skip_all)]
    pub async fn logout(&self, token: Option<&str>) -> ServiceResult<()> {
        let Some(token) = token else {
            return Ok(());
        };
        let claims = match self.ctx.jwt_service().decode_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "Logout with unusable token");
                return Ok(());
            }
        };

        if let Some(denylist) = self.ctx.token_denylist() {
            denylist
                .revoke(&claims.jti, claims.remaining_seconds())
                .await
                .map_err(|e| AppError::Cache(e.to_string()))?;
        }

        info!(user_id = %claims.sub, "User logged out");
        Ok(())
    }
}
