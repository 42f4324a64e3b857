//! User handlers
//!
//! Profiles, follower lists, bio updates and the follow toggle.

use axum::extract::State;
use social_service::{
    BioResponse, FollowResponse, FollowersResponse, FollowingResponse, UpdateBioRequest, UserBody,
    UserService,
};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> ApiResult<ApiJson<UserBody>> {
    let user = UserService::new(state.service_context())
        .get_user(user_id)
        .await?;
    Ok(ApiJson(UserBody { user }))
}

/// GET /api/users/followers/:id
pub async fn get_followers(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> ApiResult<ApiJson<FollowersResponse>> {
    let followers = UserService::new(state.service_context())
        .get_followers(user_id)
        .await?;
    Ok(ApiJson(FollowersResponse { followers }))
}

/// GET /api/users/following/:id
pub async fn get_following(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> ApiResult<ApiJson<FollowingResponse>> {
    let following = UserService::new(state.service_context())
        .get_following(user_id)
        .await?;
    Ok(ApiJson(FollowingResponse { following }))
}

/// PATCH /api/users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateBioRequest>,
) -> ApiResult<ApiJson<BioResponse>> {
    let response = UserService::new(state.service_context())
        .update_bio(auth.user.id, request)
        .await?;
    Ok(ApiJson(response))
}

/// PATCH /api/users/follow/:id
pub async fn toggle_follow(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(target_id): IdPath,
) -> ApiResult<ApiJson<FollowResponse>> {
    let response = UserService::new(state.service_context())
        .toggle_follow(&auth.user, target_id)
        .await?;
    Ok(ApiJson(response))
}
