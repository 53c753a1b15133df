//! Token acquisition against the token exchange service.

use async_trait::async_trait;
use embedlink_models::Credentials;
use serde_json::Value;

use crate::error::HostError;

// ---------------------------------------------------------------------------
// TokenGrant
// ---------------------------------------------------------------------------

/// A successful token exchange response.
///
/// The exchange contract is `{token, …passthrough fields}`: the `token`
/// field is extracted for the login command, and the rest of the body is
/// kept unmodified for callers that want the passthrough fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    /// The opaque session token. Never parsed or validated by the host.
    pub token: String,
    /// The full response body as returned by the service.
    pub body: Value,
}

impl TokenGrant {
    /// Extract a grant from an exchange response body.
    pub fn from_body(body: Value) -> Result<Self, HostError> {
        let token = body["token"]
            .as_str()
            .ok_or_else(|| HostError::Auth("missing `token` in exchange response".into()))?
            .to_string();
        Ok(Self { token, body })
    }
}

// ---------------------------------------------------------------------------
// TokenSource
// ---------------------------------------------------------------------------

/// Source of session tokens for the embedded widget.
///
/// One call, one upstream attempt: implementations must not retry; the
/// controller decides whether to issue another request.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Exchange identity claims for a session token.
    async fn issue_token(&self, credentials: &Credentials) -> Result<TokenGrant, HostError>;
}

// ---------------------------------------------------------------------------
// HttpTokenSource
// ---------------------------------------------------------------------------

/// [`TokenSource`] backed by the token exchange service's HTTP endpoint.
pub struct HttpTokenSource {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTokenSource {
    /// Create a source targeting `{base_url}/get-wa-token`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TokenSource for HttpTokenSource {
    async fn issue_token(&self, credentials: &Credentials) -> Result<TokenGrant, HostError> {
        let res = self
            .http
            .post(format!("{}/get-wa-token", self.base_url))
            .json(credentials)
            .send()
            .await?;

        if !res.status().is_success() {
            let text = res.text().await?;
            return Err(HostError::Auth(text));
        }

        let body: Value = res.json().await?;
        TokenGrant::from_body(body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn grant_extracts_token_and_keeps_body() {
        let body = json!({"token": "abc", "expires_in": 3600});
        let grant = TokenGrant::from_body(body.clone()).unwrap();
        assert_eq!(grant.token, "abc");
        assert_eq!(grant.body, body);
    }

    #[test]
    fn grant_requires_token_field() {
        let result = TokenGrant::from_body(json!({"success": false}));
        assert!(matches!(result, Err(HostError::Auth(_))));
    }

    #[test]
    fn grant_requires_string_token() {
        let result = TokenGrant::from_body(json!({"token": 42}));
        assert!(result.is_err());
    }
}
