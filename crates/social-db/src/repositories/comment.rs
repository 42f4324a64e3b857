//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Comment;
use social_core::traits::{CommentRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::mappers::to_i64s;
use crate::models::CommentModel;

use super::error::{comment_not_found, map_db_error};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, created_by, body, created_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self, post_ids), fields(count = post_ids.len()))]
    async fn find_by_posts(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<Comment>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, created_by, body, created_at
            FROM comments
            WHERE post_id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(to_i64s(post_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO comments (id, post_id, created_by, body, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(comment.id.into_inner())
        .bind(comment.post_id.into_inner())
        .bind(comment.created_by.into_inner())
        .bind(&comment.body)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_post(&self, post_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(post_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
