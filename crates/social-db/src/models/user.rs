//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub role: String,
    pub followers: Vec<i64>,
    pub following: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
