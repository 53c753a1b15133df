//! Error types for the token exchange service.
//!
//! [`AuthError`] unifies all failure modes and implements [`axum::response::IntoResponse`]
//! so handlers can return `Result<…, AuthError>` directly.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors that can occur during a token exchange.
///
/// All variants collapse to a single HTTP 500 failure shape for the
/// caller.  The upstream's own error text may be carried for
/// diagnostics; the shared secret is never part of any variant.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The upstream authority returned a non-2xx response.
    #[error("upstream returned error: {0}")]
    UpstreamRejected(String),

    /// The HTTP call to the upstream authority failed at the transport level.
    #[error("failed to reach upstream authority: {0}")]
    Http(#[from] reqwest::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        tracing::error!(error = %detail, "token exchange failed");

        let body = json!({
            "success": false,
            "message": "token exchange failed",
            "error": detail,
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
