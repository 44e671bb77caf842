#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use jsonwebtoken::{EncodingKey, Header};
use risegate::ServerConfig;
use risegate::auth::AUTH_COOKIE_NAME;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

/// Config pointing at a port nothing listens on. Guard decisions never
/// touch the upstream, so this is enough for navigation tests.
pub fn offline_config() -> ServerConfig {
    ServerConfig {
        upstream: Url::parse("http://127.0.0.1:9").expect("Invalid URL"),
        secure_cookies: false,
    }
}

pub fn config_for(upstream: &Url) -> ServerConfig {
    ServerConfig {
        upstream: upstream.clone(),
        secure_cookies: false,
    }
}

/// Start a stub upstream authority on an ephemeral port.
pub async fn spawn_upstream(app: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Url::parse(&format!("http://{}", addr)).expect("Invalid URL")
}

/// Mint a token whose expiry claim is `offset_secs` from now. The signing
/// key is irrelevant: the gateway only reads the expiry claim.
pub fn mint_token(offset_secs: i64) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Clock error")
        .as_secs() as i64;
    let claims = serde_json::json!({ "exp": now + offset_secs });

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"not-the-real-secret"),
    )
    .expect("Failed to mint token")
}

/// Build a GET request, optionally carrying the credential cookie.
pub fn get_request(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("{}={}", AUTH_COOKIE_NAME, token));
    }
    builder.body(Body::empty()).expect("Failed to build request")
}

/// Build a POST request with a JSON body.
pub fn post_json(path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Read a JSON response body.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
