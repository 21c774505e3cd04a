//! Bearer-token authentication for the dispatch endpoint.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::Error;
use crate::server::AppState;

/// Middleware guarding `POST /mcp/v1`.
///
/// Missing or malformed `Authorization: Bearer` headers are rejected with
/// 401; a present token that does not match the configured secret gets 403.
/// The manifest and health routes are not behind this middleware.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Error> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(token) = header.and_then(|h| h.strip_prefix("Bearer ")) else {
        warn!("Rejecting request without a bearer token");
        return Err(Error::AuthenticationRequired);
    };

    if token != state.config.auth_token {
        warn!("Rejecting request with a mismatched bearer token");
        return Err(Error::InvalidToken);
    }

    Ok(next.run(request).await)
}
