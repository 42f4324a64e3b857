//! Vote handler

use axum::extract::State;
use social_service::{VoteResponse, VoteService};

use crate::extractors::{AuthUser, IdPath};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Toggle the caller's vote on a post
///
/// PATCH /api/vote/:post_id
pub async fn toggle_vote(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<ApiJson<VoteResponse>> {
    let response = VoteService::new(state.service_context())
        .toggle_vote(&auth.user, post_id)
        .await?;
    Ok(ApiJson(response))
}
