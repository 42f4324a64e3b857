//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub caption: String,
    pub images: Vec<String>,
    pub created_by: i64,
    pub tags: Vec<String>,
    pub votes: Vec<i64>,
    pub is_blacklisted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
