//! Upload database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for uploads table
#[derive(Clone, FromRow)]
pub struct UploadModel {
    pub filename: String,
    pub content_type: String,
    pub length: i64,
    pub data: Vec<u8>,
    pub uploaded_at: DateTime<Utc>,
}
