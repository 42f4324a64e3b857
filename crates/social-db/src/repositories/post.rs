//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Post;
use social_core::traits::{PostQuery, PostRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::mappers::to_i64s;
use crate::models::PostModel;

use super::error::{map_db_error, post_not_found};

const POST_COLUMNS: &str =
    "id, caption, images, created_by, tags, votes, is_blacklisted, created_at, updated_at";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// No row back from a vote update means the post is gone
fn vote_count(post_id: Snowflake, count: Option<i32>) -> RepoResult<usize> {
    count
        .map(|n| usize::try_from(n).unwrap_or_default())
        .ok_or_else(|| post_not_found(post_id))
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: PostQuery) -> RepoResult<Vec<Post>> {
        let limit = query.limit.clamp(1, 100);

        let results = sqlx::query_as::<_, PostModel>(&format!(
            r"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE ($1::BIGINT IS NULL OR created_by = $1)
              AND ($2 OR NOT is_blacklisted)
              AND ($3::BIGINT IS NULL OR id < $3)
            ORDER BY id DESC
            LIMIT $4
            "
        ))
        .bind(query.created_by.map(Snowflake::into_inner))
        .bind(query.include_blacklisted)
        .bind(query.before.map(Snowflake::into_inner))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(
        &self,
        ids: &[Snowflake],
        include_blacklisted: bool,
    ) -> RepoResult<Vec<Post>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, PostModel>(&format!(
            r"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE id = ANY($1) AND ($2 OR NOT is_blacklisted)
            ORDER BY id DESC
            "
        ))
        .bind(to_i64s(ids))
        .bind(include_blacklisted)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO posts (id, caption, images, created_by, tags, votes, is_blacklisted,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.caption)
        .bind(&post.images)
        .bind(post.created_by.into_inner())
        .bind(&post.tags)
        .bind(to_i64s(&post.votes))
        .bind(post.is_blacklisted)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn update_caption(&self, post: &Post) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET caption = $2, tags = $3, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.caption)
        .bind(&post.tags)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(post.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_blacklisted(&self, id: Snowflake, blacklisted: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET is_blacklisted = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(blacklisted)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_vote(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<usize> {
        let count: Option<i32> = sqlx::query_scalar(
            r"
            UPDATE posts
            SET votes = CASE WHEN $2 = ANY(votes) THEN votes ELSE array_append(votes, $2) END
            WHERE id = $1
            RETURNING cardinality(votes)
            ",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        vote_count(post_id, count)
    }

    #[instrument(skip(self))]
    async fn remove_vote(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<usize> {
        let count: Option<i32> = sqlx::query_scalar(
            r"
            UPDATE posts
            SET votes = array_remove(votes, $2)
            WHERE id = $1
            RETURNING cardinality(votes)
            ",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        vote_count(post_id, count)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }
}
