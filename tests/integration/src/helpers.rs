//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, seeding users, and making
//! HTTP requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::Result;
use reqwest::{multipart, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use social_api::{create_app, create_app_state};
use social_common::{AppConfig, JwtService};
use social_core::{Role, SnowflakeGenerator, User, UserRepository};
use social_db::{PgPool, PgUserRepository};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::unique_suffix;

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// IDs for seeded users; a worker id the server never uses
fn seed_ids() -> &'static SnowflakeGenerator {
    static GENERATOR: OnceLock<SnowflakeGenerator> = OnceLock::new();
    GENERATOR.get_or_init(|| SnowflakeGenerator::new(1023))
}

/// A user written straight to the database plus a session token for it
#[derive(Debug, Clone)]
pub struct SeededUser {
    pub user: User,
    pub token: String,
}

impl SeededUser {
    pub fn id(&self) -> String {
        self.user.id.to_string()
    }
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pool: PgPool,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let jwt = JwtService::new(&config.jwt.secret, config.jwt.expires_in);

        let state = create_app_state(config).await?;
        let pool = state
            .db_pool()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("app state has no database pool"))?;

        let app = create_app(state)?;

        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            pool,
            jwt,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Insert a user directly and mint a session token for it
    pub async fn seed_user(&self, name: &str) -> Result<SeededUser> {
        self.seed_with_role(name, Role::User).await
    }

    pub async fn seed_admin(&self, name: &str) -> Result<SeededUser> {
        self.seed_with_role(name, Role::Admin).await
    }

    async fn seed_with_role(&self, name: &str, role: Role) -> Result<SeededUser> {
        let suffix = unique_suffix();
        let mut user = User::new(
            seed_ids().generate(),
            format!("{name}{suffix}-{}@example.com", std::process::id()),
            name.to_string(),
            "Tester".to_string(),
        );
        user.role = role;

        PgUserRepository::new(self.pool.clone()).create(&user).await?;
        let token = self.jwt.issue_token(user.id, user.role)?;

        Ok(SeededUser { user, token })
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a multipart POST request with auth token
    pub async fn post_multipart_auth(
        &self,
        path: &str,
        token: &str,
        form: multipart::Form,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Create a post with one generated image
    pub async fn create_post(&self, token: &str, caption: &str) -> Result<Response> {
        let form = multipart::Form::new()
            .text("caption", caption.to_string())
            .part("image", png_part(1600, 400)?);
        self.post_multipart_auth("/api/posts", token, form).await
    }
}

/// A PNG file part of the given size
pub fn png_part(width: u32, height: u32) -> Result<multipart::Part> {
    Ok(multipart::Part::bytes(png_bytes(width, height)?)
        .file_name("photo.png")
        .mime_str("image/png")?)
}

/// Encode a solid-color PNG
pub fn png_bytes(width: u32, height: u32) -> Result<Vec<u8>> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img).write_to(
        &mut std::io::Cursor::new(&mut buf),
        image::ImageOutputFormat::Png,
    )?;
    Ok(buf)
}

/// Create a test configuration
///
/// Reads the environment; a placeholder Google client id is filled in since
/// these tests never call Google.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut vars: HashMap<String, String> = std::env::vars().collect();
    vars.entry("GOOGLE_CLIENT_ID".to_string())
        .or_insert_with(|| "integration-tests.apps.googleusercontent.com".to_string());
    vars.insert("RATE_LIMIT_ENABLED".to_string(), "false".to_string());

    AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    for var in ["DATABASE_URL", "REDIS_URL", "JWT_SECRET"] {
        if std::env::var(var).is_err() {
            eprintln!("Skipping test: {var} not set");
            return false;
        }
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error response and return its message
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: crate::fixtures::ErrorResponse = assert_json(response, expected_status).await?;
    Ok(body.error.message)
}
