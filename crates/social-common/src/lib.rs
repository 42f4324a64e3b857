//! # social-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, GoogleIdentityProvider, GoogleTokenInfo, JwtService, TOKEN_COOKIE};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, GoogleConfig,
    JwtConfig, RateLimitConfig, RedisConfig, ServerConfig, SnowflakeConfig, StorageConfig,
};
pub use error::{domain_status, AppError, AppResult, ErrorResponse};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
