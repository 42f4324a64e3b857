//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{FollowAction, User};
use social_core::error::DomainError;
use social_core::traits::{RepoResult, UserRepository};
use social_core::value_objects::Snowflake;

use crate::mappers::to_i64s;
use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

const USER_COLUMNS: &str = "id, email, firstname, lastname, avatar, bio, role, followers, following, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)"
        ))
        .bind(to_i64s(ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, firstname, lastname, avatar, bio, role,
                               followers, following, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.email)
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(&user.avatar)
        .bind(&user.bio)
        .bind(user.role.as_str())
        .bind(to_i64s(&user.followers))
        .bind(to_i64s(&user.following))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update_profile(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET firstname = $2, lastname = $3, avatar = $4, bio = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(&user.avatar)
        .bind(&user.bio)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn apply_follow(
        &self,
        follower: Snowflake,
        followee: Snowflake,
        action: FollowAction,
    ) -> RepoResult<()> {
        let (following_sql, followers_sql) = match action {
            FollowAction::Follow => (
                r"
                UPDATE users
                SET following = array_append(following, $2), updated_at = NOW()
                WHERE id = $1 AND NOT ($2 = ANY(following))
                ",
                r"
                UPDATE users
                SET followers = array_append(followers, $2), updated_at = NOW()
                WHERE id = $1 AND NOT ($2 = ANY(followers))
                ",
            ),
            FollowAction::Unfollow => (
                r"
                UPDATE users
                SET following = array_remove(following, $2), updated_at = NOW()
                WHERE id = $1
                ",
                r"
                UPDATE users
                SET followers = array_remove(followers, $2), updated_at = NOW()
                WHERE id = $1
                ",
            ),
        };

        // both sides commit together or not at all
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(following_sql)
            .bind(follower.into_inner())
            .bind(followee.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query(followers_sql)
            .bind(followee.into_inner())
            .bind(follower.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
