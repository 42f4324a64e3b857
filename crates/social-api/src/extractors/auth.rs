//! Authentication extractors
//!
//! The session token is read from the `Authorization: Bearer` header, falling
//! back to the `jwt` cookie set at login.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use social_common::{AppError, Claims, TOKEN_COOKIE};
use social_core::User;
use social_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Pull the session token from the request, header first
pub async fn bearer_or_cookie_token<S>(parts: &mut Parts, state: &S) -> Option<String>
where
    S: Send + Sync,
{
    if let Ok(TypedHeader(Authorization(bearer))) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
    {
        return Some(bearer.token().to_string());
    }

    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Authenticated user, loaded fresh from the store on every request
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    pub claims: Claims,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_or_cookie_token(parts, state)
            .await
            .ok_or(AppError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let (user, claims) = AuthService::new(app_state.service_context())
            .authenticate(&token)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected session token");
                e
            })?;

        Ok(AuthUser { user, claims })
    }
}

/// Authenticated user with the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser { user, .. } = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!(user_id = %user.id, "Admin route refused");
            return Err(AppError::InsufficientPermissions.into());
        }
        Ok(AdminUser(user))
    }
}
