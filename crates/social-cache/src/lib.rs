//! # social-cache
//!
//! Redis layer for short-lived authentication state.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Token Denylist**: Revoked JWT IDs kept until the token would have expired
//!
//! ## Example
//!
//! ```ignore
//! use social_cache::{RedisPool, RedisPoolConfig, TokenDenylist};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let denylist = TokenDenylist::new(pool.clone());
//!
//! denylist.revoke(&claims.jti, claims.remaining_seconds()).await?;
//! assert!(denylist.is_revoked(&claims.jti).await?);
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export session types
pub use session::TokenDenylist;
