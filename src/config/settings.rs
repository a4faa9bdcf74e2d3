//! Application settings loaded from environment variables.

use std::env;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

use super::constants::{
    DEFAULT_DATABASE_NAME, DEFAULT_DATABASE_URL, DEFAULT_DB_CLUSTER,
    DEFAULT_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// How bearer tokens are verified.
#[derive(Clone)]
pub enum IdentityConfig {
    /// Firebase ID tokens (RS256, Google signing keys)
    Firebase { project_id: String },
    /// HS256 tokens signed with a shared secret (local development)
    SharedSecret {
        secret: String,
        expiration_hours: i64,
    },
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityConfig::Firebase { project_id } => f
                .debug_struct("Firebase")
                .field("project_id", project_id)
                .finish(),
            IdentityConfig::SharedSecret {
                expiration_hours, ..
            } => f
                .debug_struct("SharedSecret")
                .field("secret", &"[REDACTED]")
                .field("expiration_hours", expiration_hours)
                .finish(),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_name: String,
    pub identity: IdentityConfig,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("database_name", &self.database_name)
            .field("identity", &self.identity)
            .finish()
    }
}

/// The only field we need from a Firebase service-account key.
#[derive(Deserialize)]
struct ServiceAccountKey {
    project_id: String,
}

impl Config {
    /// Load configuration from the environment (and `.env`, if present).
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = database_url(
            env::var("DATABASE_URL").ok(),
            env::var("DB_USERNAME").ok(),
            env::var("DB_PASSWORD").ok(),
            env::var("DB_CLUSTER").ok(),
        );

        let identity = if let Ok(encoded) = env::var("FB_SERVICE_KEY") {
            IdentityConfig::Firebase {
                project_id: project_id_from_service_key(&encoded)?,
            }
        } else if let Ok(project_id) = env::var("FIREBASE_PROJECT_ID") {
            IdentityConfig::Firebase { project_id }
        } else if let Ok(secret) = env::var("JWT_SECRET") {
            if secret.len() < MIN_JWT_SECRET_LENGTH {
                return Err(AppError::internal(format!(
                    "JWT_SECRET must be at least {} characters long",
                    MIN_JWT_SECRET_LENGTH
                )));
            }
            tracing::warn!("Using shared-secret token verification; set FB_SERVICE_KEY in production");
            IdentityConfig::SharedSecret {
                secret,
                expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            }
        } else {
            return Err(AppError::internal(
                "one of FB_SERVICE_KEY, FIREBASE_PROJECT_ID or JWT_SECRET must be set",
            ));
        };

        Ok(Self {
            database_url,
            database_name: env::var("DB_NAME")
                .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string()),
            identity,
        })
    }
}

/// Resolve the MongoDB connection string.
///
/// An explicit URL wins; otherwise Atlas credentials are combined with the
/// cluster host; otherwise a local server is assumed.
pub fn database_url(
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    cluster: Option<String>,
) -> String {
    if let Some(url) = url.filter(|u| !u.is_empty()) {
        return url;
    }

    match (username, password) {
        (Some(user), Some(pass)) => format!(
            "mongodb+srv://{}:{}@{}/?appName=Cluster0",
            user,
            pass,
            cluster.unwrap_or_else(|| DEFAULT_DB_CLUSTER.to_string())
        ),
        _ => DEFAULT_DATABASE_URL.to_string(),
    }
}

/// Extract the project id from a base64-encoded service-account key.
pub fn project_id_from_service_key(encoded: &str) -> AppResult<String> {
    let raw = STANDARD
        .decode(encoded.trim())
        .map_err(|e| AppError::internal(format!("FB_SERVICE_KEY is not valid base64: {}", e)))?;

    let key: ServiceAccountKey = serde_json::from_slice(&raw).map_err(|e| {
        AppError::internal(format!("FB_SERVICE_KEY is not a service-account key: {}", e))
    })?;

    Ok(key.project_id)
}
