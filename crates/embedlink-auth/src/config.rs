//! Token exchange service configuration.
//!
//! Built from environment variables at startup and injected into Axum
//! handlers via [`axum::extract::State`].

/// Global configuration shared across all handlers.
///
/// Constructed once at startup and passed as Axum shared state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Widget vendor token endpoint the identity claims are forwarded to.
    pub upstream_token_url: String,
    /// Shared secret presented to the vendor on every exchange.
    ///
    /// Travels only in the outbound `Authorization` header; must never
    /// appear in a response body, an error message, or a log line.
    pub secret_key: String,
    /// Port to listen on (default `3000`).
    pub listen_port: u16,
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable             | Default                       | Description               |
    /// |----------------------|-------------------------------|---------------------------|
    /// | `AUTH_PORT`          | `3000`                        | HTTP listen port          |
    /// | `UPSTREAM_TOKEN_URL` | `http://localhost:4000/token` | Vendor token endpoint     |
    /// | `WIDGET_SECRET_KEY`  | `embedlink-dev-secret`        | Vendor shared secret      |
    pub fn from_env() -> Self {
        let listen_port: u16 = std::env::var("AUTH_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let upstream_token_url = std::env::var("UPSTREAM_TOKEN_URL")
            .unwrap_or_else(|_| "http://localhost:4000/token".to_string());

        let secret_key = std::env::var("WIDGET_SECRET_KEY")
            .unwrap_or_else(|_| "embedlink-dev-secret".to_string());

        Self {
            upstream_token_url,
            secret_key,
            listen_port,
        }
    }
}
