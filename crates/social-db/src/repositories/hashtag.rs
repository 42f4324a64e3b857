//! PostgreSQL implementation of HashtagRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Hashtag;
use social_core::traits::{HashtagRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::models::HashtagModel;

use super::error::map_db_error;

/// PostgreSQL implementation of HashtagRepository
#[derive(Clone)]
pub struct PgHashtagRepository {
    pool: PgPool,
}

impl PgHashtagRepository {
    /// Create a new PgHashtagRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HashtagRepository for PgHashtagRepository {
    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Hashtag>> {
        let result = sqlx::query_as::<_, HashtagModel>(
            "SELECT name, posts FROM hashtags WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Hashtag::from))
    }

    #[instrument(skip(self))]
    async fn attach_post(&self, name: &str, post_id: Snowflake) -> RepoResult<()> {
        // single-statement upsert: no read-then-write window
        sqlx::query(
            r"
            INSERT INTO hashtags (name, posts)
            VALUES ($1, ARRAY[$2::BIGINT])
            ON CONFLICT (name) DO UPDATE
            SET posts = array_append(hashtags.posts, $2::BIGINT)
            WHERE NOT ($2::BIGINT = ANY(hashtags.posts))
            ",
        )
        .bind(name)
        .bind(post_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn detach_post(&self, name: &str, post_id: Snowflake) -> RepoResult<()> {
        sqlx::query("UPDATE hashtags SET posts = array_remove(posts, $2) WHERE name = $1")
            .bind(name)
            .bind(post_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn detach_post_everywhere(&self, post_id: Snowflake) -> RepoResult<()> {
        sqlx::query("UPDATE hashtags SET posts = array_remove(posts, $1) WHERE $1 = ANY(posts)")
            .bind(post_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
