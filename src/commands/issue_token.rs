//! Issue-token command - Mints a shared-secret bearer token.

use crate::cli::args::IssueTokenArgs;
use crate::config::{Config, IdentityConfig};
use crate::errors::{AppError, AppResult};
use crate::services::SharedSecretVerifier;

/// Execute the issue-token command
pub fn execute(args: IssueTokenArgs, config: Config) -> AppResult<()> {
    let token = issue(&args, &config.identity)?;
    println!("{}", token);
    Ok(())
}

/// Sign a token for `args.email`; only possible with a shared secret.
pub fn issue(args: &IssueTokenArgs, identity: &IdentityConfig) -> AppResult<String> {
    let IdentityConfig::SharedSecret {
        secret,
        expiration_hours,
    } = identity
    else {
        return Err(AppError::BadRequest(
            "issue-token needs JWT_SECRET; Firebase tokens come from Firebase Authentication"
                .to_string(),
        ));
    };

    let verifier = SharedSecretVerifier::new(secret.clone(), *expiration_hours);
    let token = verifier.issue(&args.sub, &args.email)?;
    tracing::info!(email = %args.email, expires_in = verifier.expires_in(), "Issued token");
    Ok(token)
}
