//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT};

/// Aid Bridge - aid requests, volunteers and campaigns over HTTP
#[derive(Parser, Debug)]
#[command(name = "aid-bridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Connect to the database and ping it
    Ping,

    /// Encode a Firebase service-account file for FB_SERVICE_KEY
    EncodeKey(EncodeKeyArgs),

    /// Mint a bearer token signed with JWT_SECRET (local development only)
    IssueToken(IssueTokenArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = DEFAULT_SERVER_HOST, env = "SERVER_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_SERVER_PORT, env = "PORT")]
    pub port: u16,
}

/// Arguments for the encode-key command
#[derive(Parser, Debug)]
pub struct EncodeKeyArgs {
    /// Path to the service-account JSON file
    pub path: PathBuf,
}

/// Arguments for the issue-token command
#[derive(Parser, Debug)]
pub struct IssueTokenArgs {
    /// Email the token identifies
    #[arg(short, long)]
    pub email: String,

    /// Subject (provider-side user id)
    #[arg(short, long, default_value = "local-dev")]
    pub sub: String,
}
