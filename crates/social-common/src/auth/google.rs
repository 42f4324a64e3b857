//! Google ID-token verification
//!
//! Tokens are checked against Google's `tokeninfo` endpoint, then the audience
//! and issuer are matched locally.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use social_core::{DomainError, IdentityProfile, IdentityProvider};
use std::time::Duration;

use crate::config::GoogleConfig;

const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Subset of the `tokeninfo` response for an ID token
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTokenInfo {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Google returns this as the string "true"/"false"
    #[serde(default)]
    pub email_verified: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl GoogleTokenInfo {
    /// Check audience and issuer, then extract the profile
    pub fn into_profile(self, client_id: &str) -> Result<IdentityProfile, DomainError> {
        if self.aud != client_id {
            return Err(DomainError::InvalidIdentityToken(
                "token audience mismatch".to_string(),
            ));
        }
        if !GOOGLE_ISSUERS.contains(&self.iss.as_str()) {
            return Err(DomainError::InvalidIdentityToken(format!(
                "unexpected issuer '{}'",
                self.iss
            )));
        }
        if self.email_verified.as_deref() == Some("false") {
            return Err(DomainError::InvalidIdentityToken(
                "email address is not verified".to_string(),
            ));
        }
        let email = self
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| DomainError::InvalidIdentityToken("token has no email".to_string()))?;

        let given_name = self
            .given_name
            .or(self.name)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

        Ok(IdentityProfile {
            subject: self.sub,
            email,
            given_name,
            family_name: self.family_name.unwrap_or_default(),
            picture: self.picture,
        })
    }
}

/// [`IdentityProvider`] backed by Google sign-in
#[derive(Debug, Clone)]
pub struct GoogleIdentityProvider {
    client: Client,
    client_id: String,
    tokeninfo_url: String,
}

impl GoogleIdentityProvider {
    pub fn new(config: &GoogleConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| DomainError::InternalError(format!("http client: {e}")))?;

        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            tokeninfo_url: config.tokeninfo_url.clone(),
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    #[tracing::instrument(skip_all)]
    async fn verify(&self, id_token: &str) -> Result<IdentityProfile, DomainError> {
        let response = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| DomainError::InternalError(format!("Failed to verify token: {e}")))?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Google rejected ID token");
            return Err(DomainError::InvalidIdentityToken(
                "token rejected by Google".to_string(),
            ));
        }

        let info: GoogleTokenInfo = response
            .json()
            .await
            .map_err(|e| DomainError::InternalError(format!("Failed to parse token info: {e}")))?;

        info.into_profile(&self.client_id)
    }
}
