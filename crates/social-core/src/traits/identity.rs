//! Third-party identity verification

use async_trait::async_trait;

use crate::error::DomainError;

/// Profile claims taken from a verified identity token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    /// Provider-scoped subject identifier
    pub subject: String,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    pub picture: Option<String>,
}

/// Verifies an ID token issued by an external provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify `id_token` and return the profile it asserts.
    ///
    /// Rejected tokens yield [`DomainError::InvalidIdentityToken`].
    async fn verify(&self, id_token: &str) -> Result<IdentityProfile, DomainError>;
}
