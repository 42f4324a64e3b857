//! Service context - dependency container for services
//!
//! Holds all repositories, the identity provider, the token denylist and the
//! upload pipeline needed by services.

use std::sync::Arc;

use social_cache::TokenDenylist;
use social_common::auth::JwtService;
use social_common::StorageConfig;
use social_core::traits::{
    CommentRepository, FileRepository, HashtagRepository, IdentityProvider, PostRepository,
    UserRepository,
};
use social_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};
use super::media::ImageProcessor;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// Repositories are trait objects so tests can swap in in-memory versions.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    hashtag_repo: Arc<dyn HashtagRepository>,
    file_repo: Arc<dyn FileRepository>,

    // External identity
    identity_provider: Arc<dyn IdentityProvider>,

    // Revoked tokens; absent when running without Redis
    token_denylist: Option<TokenDenylist>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    image_processor: Arc<ImageProcessor>,
    storage: StorageConfig,
}

impl ServiceContext {
    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the hashtag repository
    pub fn hashtag_repo(&self) -> &dyn HashtagRepository {
        self.hashtag_repo.as_ref()
    }

    /// Get the upload store
    pub fn file_repo(&self) -> &dyn FileRepository {
        self.file_repo.as_ref()
    }

    // === Auth ===

    /// Get the external identity provider
    pub fn identity_provider(&self) -> &dyn IdentityProvider {
        self.identity_provider.as_ref()
    }

    /// Get the revoked-token denylist, if configured
    pub fn token_denylist(&self) -> Option<&TokenDenylist> {
        self.token_denylist.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    // === Media ===

    /// Get the image processor
    pub fn image_processor(&self) -> &ImageProcessor {
        self.image_processor.as_ref()
    }

    /// Get the upload limits
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    // === IDs ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("token_denylist", &self.token_denylist.is_some())
            .field("jwt_service", &self.jwt_service)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    hashtag_repo: Option<Arc<dyn HashtagRepository>>,
    file_repo: Option<Arc<dyn FileRepository>>,
    identity_provider: Option<Arc<dyn IdentityProvider>>,
    token_denylist: Option<TokenDenylist>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    storage: Option<StorageConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn hashtag_repo(mut self, repo: Arc<dyn HashtagRepository>) -> Self {
        self.hashtag_repo = Some(repo);
        self
    }

    pub fn file_repo(mut self, repo: Arc<dyn FileRepository>) -> Self {
        self.file_repo = Some(repo);
        self
    }

    pub fn identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    pub fn token_denylist(mut self, denylist: TokenDenylist) -> Self {
        self.token_denylist = Some(denylist);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn storage(mut self, storage: StorageConfig) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        let storage = self.storage.unwrap_or_default();

        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            post_repo: required(self.post_repo, "post_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            hashtag_repo: required(self.hashtag_repo, "hashtag_repo")?,
            file_repo: required(self.file_repo, "file_repo")?,
            identity_provider: required(self.identity_provider, "identity_provider")?,
            token_denylist: self.token_denylist,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            snowflake_generator: required(self.snowflake_generator, "snowflake_generator")?,
            image_processor: Arc::new(ImageProcessor::from(&storage)),
            storage,
        })
    }
}
