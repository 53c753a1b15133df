//! Host error types.
//!
//! [`HostError`] is the single error type returned by every fallible
//! operation in this crate.  It wraps underlying transport, serialization
//! and token-exchange errors into a unified enum.  The controller's public
//! entry points catch and log these instead of propagating them: no
//! failure may crash the host page.

/// Error type for all host-side operations.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Invalid or missing configuration (e.g. bad URL, missing credentials).
    #[error("configuration error: {0}")]
    Config(String),

    /// The token exchange service rejected the request.
    #[error("token exchange failed: {0}")]
    Auth(String),

    /// The window-messaging transport failed to post a frame.
    #[error("transport error: {0}")]
    Transport(String),

    /// HTTP request failure (e.g. token service unreachable).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
