//! Encode-key command - Turns a service-account file into one base64 line.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::cli::args::EncodeKeyArgs;
use crate::config::project_id_from_service_key;
use crate::errors::{AppError, AppResult};

/// Execute the encode-key command
pub async fn execute(args: EncodeKeyArgs) -> AppResult<()> {
    let contents = tokio::fs::read(&args.path).await.map_err(|e| {
        AppError::BadRequest(format!("cannot read {}: {}", args.path.display(), e))
    })?;

    let encoded = encode(&contents);

    // Refuse to print something serve would reject later.
    let project = project_id_from_service_key(&encoded)?;
    tracing::debug!(%project, "Encoded service key");

    println!("{}", encoded);
    Ok(())
}

/// Base64 of the file contents on a single line
pub fn encode(contents: &[u8]) -> String {
    STANDARD.encode(contents)
}
