//! Stored upload handler

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use social_service::MediaService;

use crate::response::ApiResult;
use crate::state::AppState;

/// Stored filenames are random, so a file never changes once written
const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Stream a stored image
///
/// GET /api/files/:filename
pub async fn get_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let file = MediaService::new(state.service_context())
        .get_file(&filename)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
        ],
        file.data,
    ))
}
