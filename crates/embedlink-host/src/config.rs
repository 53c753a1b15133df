//! Host controller configuration.
//!
//! Supplied out-of-band by the embedding page: the widget's source URL,
//! the token exchange service base URL, and the origin allow-list.

use crate::origin::origin_of;

/// Configuration for one [`HostController`](crate::HostController).
///
/// Constructed once per page load.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// The iframe's configured source URL. Its origin is the fallback
    /// target for outgoing frames until the widget's real origin has
    /// been captured.
    pub widget_url: String,
    /// Base URL of the token exchange service.
    pub token_service_url: String,
    /// Trusted origins, matched by substring.
    pub allowed_origins: Vec<String>,
}

impl HostConfig {
    /// Build a configuration from its parts.
    pub fn new(
        widget_url: impl Into<String>,
        token_service_url: impl Into<String>,
        allowed_origins: Vec<String>,
    ) -> Self {
        Self {
            widget_url: widget_url.into(),
            token_service_url: token_service_url.into(),
            allowed_origins,
        }
    }

    /// Build the configuration from environment variables.
    ///
    /// | Variable              | Default                             | Description                      |
    /// |-----------------------|-------------------------------------|----------------------------------|
    /// | `EMBED_WIDGET_URL`    | `http://localhost:5173/embed`       | Widget iframe source URL         |
    /// | `TOKEN_SERVICE_URL`   | `http://localhost:3000`             | Token exchange service base URL  |
    /// | `EMBED_ALLOWED_ORIGINS` | `localhost`                       | Comma-separated allow-list       |
    pub fn from_env() -> Self {
        let widget_url = std::env::var("EMBED_WIDGET_URL")
            .unwrap_or_else(|_| "http://localhost:5173/embed".to_string());
        let token_service_url = std::env::var("TOKEN_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let allowed_origins = std::env::var("EMBED_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "localhost".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            widget_url,
            token_service_url,
            allowed_origins,
        }
    }

    /// Origin of the configured widget URL, when derivable.
    pub fn widget_origin(&self) -> Option<String> {
        origin_of(&self.widget_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_origin_derived_from_url() {
        let cfg = HostConfig::new(
            "https://widget.example.com/embed?tenant=t1",
            "http://localhost:3000",
            vec![],
        );
        assert_eq!(
            cfg.widget_origin().as_deref(),
            Some("https://widget.example.com")
        );
    }

    #[test]
    fn widget_origin_none_for_bad_url() {
        let cfg = HostConfig::new("nonsense", "http://localhost:3000", vec![]);
        assert_eq!(cfg.widget_origin(), None);
    }
}
