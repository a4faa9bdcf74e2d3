//! Identity verification - turns bearer tokens into identity claims.
//!
//! The platform never stores credentials; it trusts an external identity
//! provider and only checks the tokens it issues.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::FirebaseVerifier;
use crate::config::{IdentityConfig, SECONDS_PER_HOUR};
use crate::errors::AppResult;

/// Decoded identity attached to authenticated requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Provider-side user id
    pub sub: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Identity provider trait for dependency injection.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify a bearer token and extract its claims
    async fn verify_token(&self, token: &str) -> AppResult<IdentityClaims>;
}

/// Build the provider selected by configuration.
pub fn identity_provider(config: &IdentityConfig) -> Arc<dyn IdentityProvider> {
    match config {
        IdentityConfig::Firebase { project_id } => {
            Arc::new(FirebaseVerifier::new(project_id.clone()))
        }
        IdentityConfig::SharedSecret {
            secret,
            expiration_hours,
        } => Arc::new(SharedSecretVerifier::new(secret.clone(), *expiration_hours)),
    }
}

/// HS256 tokens signed with a shared secret.
///
/// Used for local development and tests, where no Firebase project is
/// available; it can also mint tokens.
#[derive(Clone)]
pub struct SharedSecretVerifier {
    secret: String,
    expiration_hours: i64,
}

impl SharedSecretVerifier {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    /// Issue a token for the given identity.
    pub fn issue(&self, sub: &str, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.expiration_hours);

        let claims = IdentityClaims {
            sub: sub.to_string(),
            email: email.to_string(),
            name: None,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?)
    }

    /// Lifetime of issued tokens in seconds
    pub fn expires_in(&self) -> i64 {
        self.expiration_hours * SECONDS_PER_HOUR
    }
}

#[async_trait]
impl IdentityProvider for SharedSecretVerifier {
    async fn verify_token(&self, token: &str) -> AppResult<IdentityClaims> {
        let token_data = decode::<IdentityClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
