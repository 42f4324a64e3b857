//! Revoked token storage in Redis.
//!
//! Access tokens are stateless JWTs, so logging out records the token's `jti`
//! here until the token would have expired anyway.

use crate::pool::{RedisPool, RedisResult};

/// Key prefix for revoked token IDs
const REVOKED_TOKEN_PREFIX: &str = "revoked:";

/// Denylist of revoked JWT IDs
#[derive(Debug, Clone)]
pub struct TokenDenylist {
    pool: RedisPool,
}

impl TokenDenylist {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Generate Redis key for a token ID
    fn key(jti: &str) -> String {
        format!("{REVOKED_TOKEN_PREFIX}{jti}")
    }

    /// Revoke a token for its remaining lifetime. A zero TTL is a no-op.
    pub async fn revoke(&self, jti: &str, ttl_seconds: u64) -> RedisResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        self.pool.set_ex(&Self::key(jti), "1", ttl_seconds).await?;
        tracing::debug!(jti = %jti, ttl_seconds, "Revoked access token");
        Ok(())
    }

    /// Whether the token with this ID has been revoked
    pub async fn is_revoked(&self, jti: &str) -> RedisResult<bool> {
        self.pool.exists(&Self::key(jti)).await
    }

    /// Ping the backing store
    pub async fn health_check(&self) -> RedisResult<()> {
        self.pool.health_check().await
    }
}
