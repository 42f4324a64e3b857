//! Comment handlers

use axum::extract::State;
use social_service::{CommentBody, CommentService, CreateCommentRequest};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /api/comments/:post_id
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<ApiJson<CommentBody>>> {
    let response = CommentService::new(state.service_context())
        .create_comment(&auth.user, post_id, request)
        .await?;
    Ok(Created(ApiJson(response)))
}

/// DELETE /api/comments/:comment_id
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<NoContent> {
    CommentService::new(state.service_context())
        .delete_comment(&auth.user, comment_id)
        .await?;
    Ok(NoContent)
}
