//! Aid Bridge - backend for a donation and volunteer-request platform
//!
//! Records aid requests, manages volunteer applications, tracks
//! fundraising campaigns and keeps role-based user records in MongoDB,
//! trusting an external identity provider for bearer tokens.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Documents, status lifecycles and submission payloads
//! - **services**: Application use cases and identity verification
//! - **infra**: MongoDB connection, repositories and Unit of Work
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response bodies
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Check the database connection
//! cargo run -- ping
//!
//! # Encode a Firebase service-account key for FB_SERVICE_KEY
//! cargo run -- encode-key service-account.json
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use errors::{AppError, AppResult};
