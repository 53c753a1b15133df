use axum::{
    extract::Json,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use rsa::{pkcs1::EncodeRsaPrivateKey, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::OnceLock;

// Global keys + shared secret
struct IssuerState {
    encoding_key: EncodingKey,
    public_jwk: Value,
    secret: String,
}

static STATE: OnceLock<IssuerState> = OnceLock::new();

#[tokio::main]
async fn main() {
    // 1. Generate RSA key pair on startup
    println!("MOCK-ISSUER: Generating RSA-2048 keys...");
    let mut rng = rand::thread_rng();
    let bits = 2048;
    let priv_key = RsaPrivateKey::new(&mut rng, bits).expect("Failed to generate private key");
    let pub_key = RsaPublicKey::from(&priv_key);

    // jsonwebtoken EncodingKey::from_rsa_pem expects PKCS#1 or PKCS#8.
    let priv_pem = priv_key.to_pkcs1_pem(rsa::pkcs8::LineEnding::LF).unwrap();
    let encoding_key = EncodingKey::from_rsa_pem(priv_pem.as_bytes()).unwrap();

    // Construct the public JWK: modulus (n) and exponent (e) in Base64URL
    use rsa::traits::PublicKeyParts;
    let n = URL_SAFE_NO_PAD.encode(pub_key.n().to_bytes_be());
    let e = URL_SAFE_NO_PAD.encode(pub_key.e().to_bytes_be());

    let public_jwk = json!({
        "kty": "RSA",
        "alg": "RS256",
        "use": "sig",
        "kid": "mock-key-1",
        "n": n,
        "e": e
    });

    let secret = std::env::var("MOCK_ISSUER_SECRET")
        .unwrap_or_else(|_| "embedlink-dev-secret".to_string());

    STATE
        .set(IssuerState {
            encoding_key,
            public_jwk,
            secret,
        })
        .ok()
        .unwrap();

    // 2. Setup routes
    let app = Router::new()
        .route("/jwks", get(jwks))
        .route("/token", post(token));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:4000").await.unwrap();
    println!("MOCK-ISSUER: Listening on http://localhost:4000");
    axum::serve(listener, app).await.unwrap();
}

// --- Endpoints ---

async fn jwks() -> Json<Value> {
    let state = STATE.get().unwrap();
    Json(json!({
        "keys": [state.public_jwk.clone()]
    }))
}

#[derive(Deserialize)]
struct TokenRequest {
    email: String,
    name: String,
    role: String,
}

#[derive(Serialize)]
struct SessionTokenClaims {
    iss: String,
    sub: String,
    aud: String,
    exp: i64,
    iat: i64,
    jti: String,
    // Custom claims
    name: String,
    role: String,
}

async fn token(headers: HeaderMap, Json(req): Json<TokenRequest>) -> (StatusCode, Json<Value>) {
    println!(
        "MOCK-ISSUER: Token request email='{}' role='{}'",
        req.email, req.role
    );

    let state = STATE.get().unwrap();

    // The exchange service must present the shared secret as a bearer header.
    let expected = format!("Bearer {}", state.secret);
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if presented != Some(expected.as_str()) {
        println!("MOCK-ISSUER: Rejected request with bad or missing secret");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "invalid secret"})),
        );
    }

    let now = Utc::now();
    let exp = now + Duration::hours(1);

    let claims = SessionTokenClaims {
        iss: "http://localhost:4000".to_string(),
        sub: req.email.clone(),
        aud: "embedlink-widget".to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
        jti: uuid::Uuid::new_v4().to_string(),
        name: req.name.clone(),
        role: req.role.clone(),
    };

    let header = Header {
        kid: Some("mock-key-1".to_string()),
        alg: Algorithm::RS256,
        ..Default::default()
    };

    let session_token = encode(&header, &claims, &state.encoding_key).unwrap();

    (
        StatusCode::OK,
        Json(json!({
            "token": session_token,
            "token_type": "Bearer",
            "expires_in": 3600
        })),
    )
}
