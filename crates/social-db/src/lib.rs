//! # social-db
//!
//! Database layer implementing the repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations, including the binary upload store
//!
//! Set-valued relations (followers, following, votes, hashtag posts) live in
//! `BIGINT[]` columns and are changed with `array_append` / `array_remove` so
//! concurrent writers never overwrite each other's whole array.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use social_db::{create_pool, run_migrations, PgUserRepository, PoolConfig};
//!
//! async fn example(config: &social_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from(config)).await?;
//!     run_migrations(&pool, &config.migrations_dir).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgCommentRepository, PgFileRepository, PgHashtagRepository, PgPostRepository,
    PgUserRepository,
};
