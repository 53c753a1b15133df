//! Upstream token issuance.
//!
//! Forwards identity claims to the widget vendor's token endpoint with
//! the held secret attached as a bearer header, and returns the vendor's
//! response body unmodified to the caller.

use embedlink_models::Credentials;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::AuthError;

/// Exchange identity claims for a vendor session token.
///
/// Exactly one upstream attempt per call; the caller decides whether to
/// retry.  The secret travels only in the `Authorization` header — never
/// as a body field, and never back to the caller.  Upstream failures
/// carry the vendor's error text for diagnostics, nothing more.
pub async fn issue_token(
    http: &reqwest::Client,
    config: &AppConfig,
    claims: &Credentials,
) -> Result<Value, AuthError> {
    let res = http
        .post(&config.upstream_token_url)
        .bearer_auth(&config.secret_key)
        .json(claims)
        .send()
        .await?;

    if !res.status().is_success() {
        let text = res.text().await.unwrap_or_default();
        return Err(AuthError::UpstreamRejected(text));
    }

    Ok(res.json().await?)
}
