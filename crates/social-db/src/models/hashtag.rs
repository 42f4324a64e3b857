//! Hashtag database model

use sqlx::FromRow;

/// Database model for hashtags table
#[derive(Debug, Clone, FromRow)]
pub struct HashtagModel {
    pub name: String,
    pub posts: Vec<i64>,
}
