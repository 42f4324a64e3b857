//! PostgreSQL-backed binary upload store

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::StoredFile;
use social_core::error::DomainError;
use social_core::traits::{FileRepository, RepoResult};

use crate::models::UploadModel;

use super::error::{file_not_found, map_db_error, map_unique_violation};

/// Stores uploads as `BYTEA` rows keyed by filename
#[derive(Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    /// Create a new PgFileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    #[instrument(skip(self, file), fields(filename = %file.filename, len = file.len()))]
    async fn store(&self, file: &StoredFile) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO uploads (filename, content_type, length, data, uploaded_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&file.filename)
        .bind(&file.content_type)
        .bind(file.len() as i64)
        .bind(&file.data)
        .bind(file.uploaded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::FileAlreadyExists(file.filename.clone()))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_filename(&self, filename: &str) -> RepoResult<Option<StoredFile>> {
        let result = sqlx::query_as::<_, UploadModel>(
            r"
            SELECT filename, content_type, length, data, uploaded_at
            FROM uploads
            WHERE filename = $1
            ",
        )
        .bind(filename)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(StoredFile::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, filename: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM uploads WHERE filename = $1")
            .bind(filename)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(file_not_found(filename));
        }

        Ok(())
    }
}
