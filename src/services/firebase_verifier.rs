//! Firebase ID token verification.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{IdentityClaims, IdentityProvider};
use crate::config::{FIREBASE_ISSUER_PREFIX, FIREBASE_JWKS_URL, FIREBASE_KEYS_MIN_REFRESH_SECS};
use crate::errors::{AppError, AppResult};

/// Google's signing keys in JWK form
#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

impl JwkSet {
    fn into_keys(self) -> AppResult<HashMap<String, DecodingKey>> {
        let mut keys = HashMap::with_capacity(self.keys.len());
        for jwk in self.keys {
            let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)?;
            keys.insert(jwk.kid, key);
        }
        Ok(keys)
    }
}

/// Signing keys by `kid`, with the time of the last fetch attempt.
#[derive(Default)]
struct KeyCache {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Option<Instant>,
}

impl KeyCache {
    fn refresh_due(&self) -> bool {
        self.fetched_at.map_or(true, |at| {
            at.elapsed() >= Duration::from_secs(FIREBASE_KEYS_MIN_REFRESH_SECS)
        })
    }
}

/// Verifies RS256 ID tokens issued by Firebase Authentication.
///
/// Signing keys are fetched lazily and refetched when a token names a key id
/// that is not known yet (Google rotates them regularly). Refetches are at
/// least `FIREBASE_KEYS_MIN_REFRESH_SECS` apart; inside that window an unknown
/// key id is simply rejected.
pub struct FirebaseVerifier {
    project_id: String,
    http: reqwest::Client,
    cache: RwLock<KeyCache>,
}

impl FirebaseVerifier {
    pub fn new(project_id: String) -> Self {
        Self {
            project_id,
            http: reqwest::Client::new(),
            cache: RwLock::new(KeyCache::default()),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[format!("{}{}", FIREBASE_ISSUER_PREFIX, self.project_id)]);
        validation
    }

    async fn fetch_keys(&self) -> AppResult<HashMap<String, DecodingKey>> {
        let set: JwkSet = self
            .http
            .get(FIREBASE_JWKS_URL)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AppError::internal(format!("failed to fetch signing keys: {}", e)))?
            .json()
            .await
            .map_err(|e| AppError::internal(format!("malformed signing keys: {}", e)))?;

        let keys = set.into_keys()?;
        tracing::debug!(count = keys.len(), "Refreshed Firebase signing keys");
        Ok(keys)
    }

    async fn key_for(&self, kid: &str) -> AppResult<DecodingKey> {
        if let Some(key) = self.cache.read().await.keys.get(kid) {
            return Ok(key.clone());
        }

        // Holding the write lock across the fetch makes concurrent misses wait
        // for a single request to Google.
        let mut cache = self.cache.write().await;
        if let Some(key) = cache.keys.get(kid) {
            return Ok(key.clone());
        }
        if !cache.refresh_due() {
            tracing::debug!(%kid, "Unknown signing key id, refresh not due yet");
            return Err(AppError::Forbidden);
        }

        cache.fetched_at = Some(Instant::now());
        cache.keys = self.fetch_keys().await?;

        cache.keys.get(kid).cloned().ok_or(AppError::Forbidden)
    }

    #[cfg(test)]
    fn with_keys(project_id: &str, keys: HashMap<String, DecodingKey>) -> Self {
        Self {
            project_id: project_id.to_string(),
            http: reqwest::Client::new(),
            cache: RwLock::new(KeyCache {
                keys,
                fetched_at: Some(Instant::now()),
            }),
        }
    }
}

#[async_trait]
impl IdentityProvider for FirebaseVerifier {
    async fn verify_token(&self, token: &str) -> AppResult<IdentityClaims> {
        let header = decode_header(token)?;
        if header.alg != Algorithm::RS256 {
            return Err(AppError::Forbidden);
        }
        let kid = header.kid.ok_or(AppError::Forbidden)?;

        let key = self.key_for(&kid).await?;
        let token_data = decode::<IdentityClaims>(token, &key, &self.validation())?;

        Ok(token_data.claims)
    }
}
