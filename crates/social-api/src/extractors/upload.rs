//! Multipart extractor for new posts
//!
//! A `caption` text field plus any number of file fields. Only fields that
//! carry a filename are treated as images; other fields are ignored.

use axum::{
    async_trait,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::StatusCode,
};
use social_service::ImageUpload;

use crate::response::ApiError;

const CAPTION_FIELD: &str = "caption";

/// Parsed body of `POST /api/posts`
#[derive(Debug, Default)]
pub struct PostUpload {
    pub caption: String,
    pub images: Vec<ImageUpload>,
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::invalid_body(e.body_text())
    }
}

#[async_trait]
impl<S> FromRequest<S> for PostUpload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        let mut upload = PostUpload::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() == Some(CAPTION_FIELD) {
                upload.caption = field.text().await.map_err(multipart_error)?;
                continue;
            }
            if field.file_name().is_none() {
                continue;
            }

            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field.bytes().await.map_err(multipart_error)?;
            upload.images.push(ImageUpload::new(content_type, data));
        }

        Ok(upload)
    }
}
