//! Client for the upstream authority (the admin REST API).
//!
//! The gateway does not own session issuance or revocation; it forwards
//! credentials as bearer tokens and interprets the upstream's answers.

use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response body of `GET /admin/auth/status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    user_logged_in: bool,
}

/// Response body of `POST /admin/auth/login`. The upstream reports
/// password failures in the body, not the transport.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginOutcome {
    pub success: bool,
    pub token: Option<String>,
    pub error: Option<String>,
}

/// HTTP client bound to the upstream base URL.
#[derive(Clone)]
pub struct AuthApi {
    client: reqwest::Client,
    base: String,
}

impl AuthApi {
    /// Build a client for the given base URL (e.g. `http://localhost:3300/api/v1`).
    pub fn new(base: &Url) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base: base.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn bearer(
        request: reqwest::RequestBuilder,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Ask the upstream whether the current session is valid. A 401 is
    /// the expected answer for a dead session and resolves to `Ok(false)`.
    pub async fn check_status(&self, token: Option<&str>) -> Result<bool, UpstreamError> {
        let response = Self::bearer(self.client.get(self.endpoint("/admin/auth/status")), token)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Ok(false),
            status if status.is_success() => {
                let body: StatusResponse =
                    response.json().await.map_err(UpstreamError::Transport)?;
                Ok(body.user_logged_in)
            }
            status => Err(UpstreamError::UnexpectedStatus(status.as_u16())),
        }
    }

    /// Submit the admin password. Only transport problems are errors here;
    /// a rejected password comes back as `LoginOutcome { success: false }`.
    pub async fn login(&self, password: &str) -> Result<LoginOutcome, UpstreamError> {
        let response = self
            .client
            .post(self.endpoint("/admin/auth/login"))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            response.json().await.map_err(UpstreamError::Transport)
        } else {
            Err(UpstreamError::UnexpectedStatus(status.as_u16()))
        }
    }

    /// Invalidate the server-side session. No body required. An already
    /// dead session (401) counts as done.
    pub async fn logout(&self, token: Option<&str>) -> Result<(), UpstreamError> {
        let response = Self::bearer(self.client.post(self.endpoint("/admin/auth/logout")), token)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            Err(UpstreamError::UnexpectedStatus(status.as_u16()))
        }
    }
}

/// Errors talking to the upstream authority.
#[derive(Debug)]
pub enum UpstreamError {
    /// Connection, timeout, or body decoding failure
    Transport(reqwest::Error),
    /// The upstream answered with a status the gateway does not expect
    UnexpectedStatus(u16),
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamError::Transport(e) => write!(f, "Upstream request failed: {}", e),
            UpstreamError::UnexpectedStatus(status) => {
                write!(f, "Unexpected upstream status: {}", status)
            }
        }
    }
}

impl std::error::Error for UpstreamError {}
