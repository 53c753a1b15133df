//! Embedlink token exchange service — trades a held secret plus user
//! identity claims for a widget session token.
//!
//! The service is the only component holding the vendor secret.  On each
//! request it:
//!
//! 1. Forwards the `{email, name, role}` claims to the vendor's token
//!    endpoint, with the secret attached as a bearer header.
//! 2. Returns the vendor's response body unmodified to the host page.

mod config;
mod error;
mod upstream;

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::{Json, State};
use axum::routing::{get, post};
use chrono::Utc;
use embedlink_models::Credentials;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AuthError;

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// State shared across all Axum handlers.
struct AppState {
    /// Global configuration (upstream endpoint + secret).
    config: AppConfig,
    /// Reused outbound HTTP client.
    http: reqwest::Client,
    /// Service start time, for the health probe's uptime field.
    started: Instant,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// Response of `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    uptime: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `POST /get-wa-token` — exchange identity claims for a session token.
///
/// The request body is the [`Credentials`] shape; the response is
/// whatever the vendor returned, passed through unmodified.
async fn get_wa_token(
    State(state): State<Arc<AppState>>,
    Json(claims): Json<Credentials>,
) -> Result<Json<Value>, AuthError> {
    info!(email = %claims.email, role = %claims.role, "token exchange request");

    let body = upstream::issue_token(&state.http, &state.config, &claims).await?;

    info!(email = %claims.email, "token issued");
    Ok(Json(body))
}

/// `GET /health` — liveness probe.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339(),
        uptime: state.started.elapsed().as_secs(),
    })
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/get-wa-token", post(get_wa_token))
        .route("/health", get(health))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env();
    info!(
        upstream = %config.upstream_token_url,
        "upstream token endpoint configured"
    );
    info!("vendor secret configured (use WIDGET_SECRET_KEY env var in production)");

    let listen_port = config.listen_port;

    let state = Arc::new(AppState {
        config,
        http: reqwest::Client::new(),
        started: Instant::now(),
    });

    let addr = format!("0.0.0.0:{listen_port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");

    info!(address = %addr, "token exchange service listening");
    axum::serve(listener, app(state)).await.expect("server error");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum_test::TestServer;
    use serde_json::json;
    use std::sync::Mutex;

    const TEST_SECRET: &str = "test-secret-key";

    /// (authorization header, forwarded body) per upstream request.
    type Captured = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    /// Spawn a fake vendor endpoint on an ephemeral port, answering every
    /// request with the given status and body while capturing what it saw.
    async fn spawn_upstream(status: StatusCode, response: Value) -> (String, Captured) {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let captured_for_handler = Arc::clone(&captured);

        let app = Router::new().route(
            "/token",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let captured = Arc::clone(&captured_for_handler);
                async move {
                    let auth = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);
                    captured.lock().unwrap().push((auth, body));
                    (status, Json(response.clone()))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/token"), captured)
    }

    fn test_app(upstream_token_url: String) -> TestServer {
        let state = Arc::new(AppState {
            config: AppConfig {
                upstream_token_url,
                secret_key: TEST_SECRET.to_string(),
                listen_port: 0,
            },
            http: reqwest::Client::new(),
            started: Instant::now(),
        });
        TestServer::new(app(state)).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let server = test_app("http://127.0.0.1:9/token".into());

        let res = server.get("/health").await;
        res.assert_status_ok();

        let body: Value = res.json();
        assert_eq!(body["status"], "OK");
        assert!(body["timestamp"].is_string());
        assert!(body["uptime"].is_number());
    }

    #[tokio::test]
    async fn exchange_forwards_claims_and_returns_body_unmodified() {
        let (url, captured) =
            spawn_upstream(StatusCode::OK, json!({"token": "tok-1", "expires_in": 3600})).await;
        let server = test_app(url);

        let res = server
            .post("/get-wa-token")
            .json(&json!({"email": "a@b.com", "name": "A", "role": "User"}))
            .await;
        res.assert_status_ok();

        let body: Value = res.json();
        assert_eq!(body, json!({"token": "tok-1", "expires_in": 3600}));

        let captured = captured.lock().unwrap();
        assert_eq!(captured.len(), 1);
        let (auth, forwarded) = &captured[0];
        // The secret travels as a bearer header, never in the body.
        assert_eq!(auth.as_deref(), Some("Bearer test-secret-key"));
        assert_eq!(
            forwarded,
            &json!({"email": "a@b.com", "name": "A", "role": "User"})
        );
    }

    #[tokio::test]
    async fn upstream_rejection_is_a_sanitized_500() {
        let (url, _captured) = spawn_upstream(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"message": "vendor exploded"}),
        )
        .await;
        let server = test_app(url);

        let res = server
            .post("/get-wa-token")
            .json(&json!({"email": "a@b.com", "name": "A", "role": "Admin"}))
            .await;
        res.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = res.json();
        assert_eq!(body["success"], json!(false));
        assert!(body["message"].is_string());
        assert!(body["error"].as_str().unwrap().contains("vendor exploded"));
        assert!(!body.to_string().contains(TEST_SECRET));
    }

    #[tokio::test]
    async fn unreachable_upstream_never_leaks_the_secret() {
        // Nothing listens on the discard port.
        let server = test_app("http://127.0.0.1:9/token".into());

        let res = server
            .post("/get-wa-token")
            .json(&json!({"email": "a@b.com", "name": "A", "role": "User"}))
            .await;
        res.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = res.json();
        assert_eq!(body["success"], json!(false));
        assert!(!body.to_string().contains(TEST_SECRET));
    }

    #[tokio::test]
    async fn unknown_role_is_rejected_before_the_upstream_call() {
        let (url, captured) = spawn_upstream(StatusCode::OK, json!({"token": "t"})).await;
        let server = test_app(url);

        let res = server
            .post("/get-wa-token")
            .json(&json!({"email": "a@b.com", "name": "A", "role": "root"}))
            .await;
        res.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(captured.lock().unwrap().is_empty());
    }
}
