//! Error types for the MCP gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the gateway.
///
/// Every variant renders as the uniform `{"error":{"message"}}` body with
/// the variant's HTTP status.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is missing or invalid at startup
    #[error("{0}")]
    Config(String),

    /// No bearer token on the dispatch endpoint
    #[error("Authentication required. Please provide a valid bearer token.")]
    AuthenticationRequired,

    /// Bearer token did not match the configured secret
    #[error("Invalid authentication token.")]
    InvalidToken,

    /// A required operation parameter is missing or the envelope is malformed
    #[error("{0}")]
    Validation(String),

    /// Function name outside the dispatch set
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Trello returned a non-success status or an unusable payload
    #[error("{0}")]
    Remote(String),

    /// Anything else
    #[error("Internal server error")]
    Internal,
}

impl Error {
    /// HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Error::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            Error::InvalidToken => StatusCode::FORBIDDEN,
            Error::Validation(_) | Error::UnknownFunction(_) => StatusCode::BAD_REQUEST,
            Error::Config(_) | Error::Remote(_) | Error::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": { "message": self.to_string() }
        }));
        (status, body).into_response()
    }
}
