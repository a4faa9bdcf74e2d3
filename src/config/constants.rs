//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication
// =============================================================================

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Minimum shared-secret length for locally issued tokens
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Default lifetime of locally issued tokens in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Google's published signing keys for Firebase ID tokens
pub const FIREBASE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Minimum time between two fetches of the signing keys
pub const FIREBASE_KEYS_MIN_REFRESH_SECS: u64 = 60;

/// Issuer prefix of Firebase ID tokens; the project id is appended
pub const FIREBASE_ISSUER_PREFIX: &str = "https://securetoken.google.com/";

// =============================================================================
// User Roles
// =============================================================================

/// Role reported for unknown users and assigned on registration
pub const ROLE_USER: &str = "user";

/// Role granted when a volunteer application is approved
pub const ROLE_VOLUNTEER: &str = "volunteer";

/// Administrator role
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 5000;

// =============================================================================
// Database
// =============================================================================

/// Connection string used when nothing else is configured
pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017";

/// Atlas cluster host used with `DB_USERNAME`/`DB_PASSWORD`
pub const DEFAULT_DB_CLUSTER: &str = "cluster0.xgglsra.mongodb.net";

/// Database holding all collections
pub const DEFAULT_DATABASE_NAME: &str = "database";

pub const COLLECTION_USERS: &str = "users";
pub const COLLECTION_REQUESTS: &str = "requests";
pub const COLLECTION_VOLUNTEERS: &str = "volunteers";
pub const COLLECTION_CAMPAIGNS: &str = "campaigns";

// =============================================================================
// Document fields
// =============================================================================

pub const FIELD_ID: &str = "_id";
pub const FIELD_ROLE: &str = "role";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_UPDATED_AT: &str = "updatedAt";
