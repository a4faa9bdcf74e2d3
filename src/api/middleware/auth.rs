//! Bearer token authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;
use crate::services::IdentityClaims;

/// Bearer token authentication middleware.
///
/// A missing or non-bearer Authorization header is rejected with 401; a token
/// the identity provider refuses is rejected with 403. Verified claims are
/// injected into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let claims = state.identity.verify_token(token).await.map_err(|e| {
        tracing::debug!(error = %e, "Bearer token rejected");
        e
    })?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Require the authenticated identity to own the given email.
pub fn require_email(claims: &IdentityClaims, email: &str) -> Result<(), AppError> {
    if claims.email == email {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
