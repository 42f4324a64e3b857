//! Post handlers
//!
//! Feeds, hashtag search, creation from multipart uploads, caption edits,
//! deletion and admin moderation.

use axum::extract::State;
use social_service::{
    FeedQuery, MessageResponse, PostBody, PostListResponse, PostService, TagSearchQuery,
    UpdatePostRequest,
};
use validator::Validate;

use crate::extractors::{AdminUser, AuthUser, IdPath, JsonBody, PostUpload, ValidatedQuery};
use crate::response::{ApiError, ApiJson, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Public feed
///
/// GET /api/posts/all
pub async fn get_all_posts(
    State(state): State<AppState>,
    ValidatedQuery(page): ValidatedQuery<FeedQuery>,
) -> ApiResult<ApiJson<PostListResponse>> {
    let posts = PostService::new(state.service_context())
        .get_feed(page)
        .await?;
    Ok(ApiJson(posts.into()))
}

/// Posts under a hashtag
///
/// GET /api/posts/tags?search=q
pub async fn get_posts_by_tag(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TagSearchQuery>,
) -> ApiResult<ApiJson<PostListResponse>> {
    let posts = PostService::new(state.service_context())
        .get_posts_by_tag(query.search.as_deref())
        .await?;
    Ok(ApiJson(posts.into()))
}

/// A user's public posts
///
/// GET /api/posts/user/:id
pub async fn get_user_posts(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
    ValidatedQuery(page): ValidatedQuery<FeedQuery>,
) -> ApiResult<ApiJson<PostListResponse>> {
    let posts = PostService::new(state.service_context())
        .get_user_posts(user_id, page)
        .await?;
    Ok(ApiJson(posts.into()))
}

/// The caller's own posts, blacklisted included
///
/// GET /api/posts
pub async fn get_my_posts(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(page): ValidatedQuery<FeedQuery>,
) -> ApiResult<ApiJson<PostListResponse>> {
    let posts = PostService::new(state.service_context())
        .get_my_posts(auth.user.id, page)
        .await?;
    Ok(ApiJson(posts.into()))
}

/// GET /api/posts/:post_id
pub async fn get_post(
    State(state): State<AppState>,
    IdPath(post_id): IdPath,
) -> ApiResult<ApiJson<PostBody>> {
    let post = PostService::new(state.service_context())
        .get_post(post_id)
        .await?;
    Ok(ApiJson(PostBody { post }))
}

/// Create a post from a multipart form
///
/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    upload: PostUpload,
) -> ApiResult<Created<ApiJson<PostBody>>> {
    let post = PostService::new(state.service_context())
        .create_post(&auth.user, upload.caption, upload.images)
        .await?;
    Ok(Created(ApiJson(PostBody { post })))
}

/// Replace the caption of one of the caller's posts
///
/// PATCH /api/posts/:post_id
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
    JsonBody(request): JsonBody<UpdatePostRequest>,
) -> ApiResult<ApiJson<PostBody>> {
    // Image changes are refused before the caption is looked at
    if !request.touches_images() {
        request.validate().map_err(ApiError::from)?;
    }

    let post = PostService::new(state.service_context())
        .update_post(&auth.user, post_id, request)
        .await?;
    Ok(ApiJson(PostBody { post }))
}

/// DELETE /api/posts/:post_id
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<NoContent> {
    PostService::new(state.service_context())
        .delete_post(&auth.user, post_id)
        .await?;
    Ok(NoContent)
}

/// PATCH /api/posts/blacklist/:post_id
pub async fn blacklist_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(post_id): IdPath,
) -> ApiResult<ApiJson<MessageResponse>> {
    let response = PostService::new(state.service_context())
        .blacklist_post(post_id)
        .await?;
    Ok(ApiJson(response))
}

/// PATCH /api/posts/whitelist/:post_id
pub async fn whitelist_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(post_id): IdPath,
) -> ApiResult<ApiJson<MessageResponse>> {
    let response = PostService::new(state.service_context())
        .whitelist_post(post_id)
        .await?;
    Ok(ApiJson(response))
}
