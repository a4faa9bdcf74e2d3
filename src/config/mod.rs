//! Application configuration module
//!
//! Handles environment variables and application-wide constants.

mod constants;
mod settings;

pub use constants::*;
pub use settings::{database_url, project_id_from_service_key, Config, IdentityConfig};
