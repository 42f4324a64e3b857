//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub google: GoogleConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" | "dev" => Ok(Self::Development),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Directory holding the SQL migrations
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
    /// Apply pending migrations at startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds
    #[serde(default = "default_token_expiry")]
    pub expires_in: i64,
    /// Cookie lifetime in days
    #[serde(default = "default_cookie_expiry_days")]
    pub cookie_expires_in_days: i64,
}

/// Google sign-in configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    /// OAuth client ID the ID token audience must match
    pub client_id: String,
    #[serde(default = "default_tokeninfo_url")]
    pub tokeninfo_url: String,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Upload storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Per-file size cap
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: u32,
    #[serde(default = "default_max_images")]
    pub max_images_per_post: usize,
    /// Longest edge after resize
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl StorageConfig {
    #[must_use]
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb as usize * 1024 * 1024
    }

    /// Body limit for a multipart post upload
    #[must_use]
    pub fn max_request_bytes(&self) -> usize {
        // room for the text fields and multipart framing
        self.max_file_size_bytes() * self.max_images_per_post + 64 * 1024
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size(),
            max_images_per_post: default_max_images(),
            max_dimension: default_max_dimension(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "social-server".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_migrations_dir() -> String {
    "./migrations".to_string()
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_token_expiry() -> i64 {
    90 * 24 * 60 * 60 // 90 days
}

fn default_cookie_expiry_days() -> i64 {
    90
}

fn default_tokeninfo_url() -> String {
    "https://oauth2.googleapis.com/tokeninfo".to_string()
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_max_file_size() -> u32 {
    10
}

fn default_max_images() -> usize {
    10
}

fn default_max_dimension() -> u32 {
    800
}

fn default_jpeg_quality() -> u8 {
    90
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or unparsable
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);

        let worker_id: u16 = vars.parse_or("WORKER_ID", 0)?;
        if worker_id > 1023 {
            return Err(ConfigError::InvalidValue(
                "WORKER_ID",
                format!("{worker_id} exceeds 1023"),
            ));
        }

        let jpeg_quality: u8 = vars.parse_or("JPEG_QUALITY", default_jpeg_quality())?;
        if !(1..=100).contains(&jpeg_quality) {
            return Err(ConfigError::InvalidValue(
                "JPEG_QUALITY",
                format!("{jpeg_quality} is outside 1..=100"),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env: vars.parse_or("SERVER_ENV", Environment::default())?,
            },
            server: ServerConfig {
                host: vars.get("SERVER_HOST").unwrap_or_else(default_host),
                port: vars.parse_or("SERVER_PORT", default_port())?,
            },
            database: DatabaseConfig {
                url: vars.require("DATABASE_URL")?,
                max_connections: vars
                    .parse_or("DATABASE_MAX_CONNECTIONS", default_max_connections())?,
                min_connections: vars
                    .parse_or("DATABASE_MIN_CONNECTIONS", default_min_connections())?,
                migrations_dir: vars
                    .get("DATABASE_MIGRATIONS_DIR")
                    .unwrap_or_else(default_migrations_dir),
                run_migrations: vars.parse_or("DATABASE_RUN_MIGRATIONS", true)?,
            },
            redis: RedisConfig {
                url: vars.require("REDIS_URL")?,
                max_connections: vars
                    .parse_or("REDIS_MAX_CONNECTIONS", default_redis_max_connections())?,
            },
            jwt: JwtConfig {
                secret: vars.require("JWT_SECRET")?,
                expires_in: vars.parse_or("JWT_EXPIRES_IN", default_token_expiry())?,
                cookie_expires_in_days: vars
                    .parse_or("JWT_COOKIE_EXPIRES_IN", default_cookie_expiry_days())?,
            },
            google: GoogleConfig {
                client_id: vars.require("GOOGLE_CLIENT_ID")?,
                tokeninfo_url: vars
                    .get("GOOGLE_TOKENINFO_URL")
                    .unwrap_or_else(default_tokeninfo_url),
            },
            rate_limit: RateLimitConfig {
                enabled: vars.parse_or("RATE_LIMIT_ENABLED", true)?,
                requests_per_second: vars
                    .parse_or("RATE_LIMIT_PER_SECOND", default_requests_per_second())?,
                burst: vars.parse_or("RATE_LIMIT_BURST", default_burst())?,
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .get("CORS_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            storage: StorageConfig {
                max_file_size_mb: vars.parse_or("MAX_UPLOAD_SIZE_MB", default_max_file_size())?,
                max_images_per_post: vars.parse_or("MAX_IMAGES_PER_POST", default_max_images())?,
                max_dimension: vars.parse_or("IMAGE_MAX_DIMENSION", default_max_dimension())?,
                jpeg_quality,
            },
            snowflake: SnowflakeConfig { worker_id },
        })
    }
}

struct Vars<'a, F>(&'a F);

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn require(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidValue(key, e.to_string())),
            None => Ok(default),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
