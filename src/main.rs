//! Aid Bridge - Application entry point
//!
//! CLI-based entry point that dispatches to various commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aid_bridge::{
    cli::{Cli, Commands},
    commands,
    config::Config,
    errors::AppResult,
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command).await {
        tracing::error!("Command failed: {:?}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> AppResult<()> {
    // encode-key runs before any environment is configured
    if let Commands::EncodeKey(args) = command {
        return commands::encode_key::execute(args).await;
    }

    let config = Config::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    match command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Ping => commands::ping::execute(config).await,
        Commands::IssueToken(args) => commands::issue_token::execute(args, config),
        Commands::EncodeKey(args) => commands::encode_key::execute(args).await,
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
