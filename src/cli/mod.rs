//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `ping` - Check database connectivity
//! - `encode-key` - Prepare a Firebase service key for the environment
//! - `issue-token` - Mint a shared-secret token for local testing

pub mod args;

pub use args::{Cli, Commands};
