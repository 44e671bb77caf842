//! Auth endpoints: status, login, logout.
//!
//! - GET `/status` - reconcile with the upstream authority, `{ userLoggedIn }`
//! - POST `/login` - forward the password, set the credential cookie
//! - POST `/logout` - best-effort upstream teardown, always clear cookies

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::{ApiError, ResultExt};
use crate::auth::{LOGIN_PATH, auth_token, clear_auth_cookies, set_auth_cookie};
use crate::session::Session;
use crate::upstream::AuthApi;

#[derive(Clone)]
pub struct AuthState {
    pub upstream: AuthApi,
    pub session: Session,
    pub secure_cookies: bool,
}

pub fn router(state: AuthState) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .with_state(state)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    user_logged_in: bool,
}

/// Ask the upstream authority whether the current session is valid and
/// reconcile the local session state with the answer. A dead session is
/// the expected case, never an error.
async fn status(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    match state.upstream.check_status(auth_token(&headers)).await {
        Ok(logged_in) => {
            state.session.apply_status(Ok(logged_in));
            Ok(Json(StatusBody {
                user_logged_in: logged_in,
            }))
        }
        Err(e) => {
            state.session.apply_status(Err(e));
            Err(ApiError::bad_gateway("Failed to verify authentication"))
        }
    }
}

#[derive(Deserialize)]
struct LoginRequest {
    password: String,
}

#[derive(Serialize)]
struct LoginBody {
    success: bool,
}

/// Submit the admin password to the upstream. On success the credential
/// lands in the cookie the route guard reads on the next navigation.
async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.password.is_empty() {
        return Err(ApiError::bad_request("Password cannot be empty"));
    }

    let outcome = state
        .upstream
        .login(&payload.password)
        .await
        .upstream_err("Login request failed")?;

    if !outcome.success {
        state.session.set_unauthenticated();
        let message = outcome
            .error
            .unwrap_or_else(|| "Invalid password".to_string());
        return Err(ApiError::unauthorized(message));
    }

    let token = outcome
        .token
        .ok_or_else(|| ApiError::bad_gateway("Upstream accepted login without a token"))?;

    state.session.set_authenticated();
    info!("Admin login succeeded");

    Ok((
        StatusCode::OK,
        AppendHeaders([(SET_COOKIE, set_auth_cookie(&token, state.secure_cookies))]),
        Json(LoginBody { success: true }),
    ))
}

/// End the session. The upstream call is best-effort: every local
/// credential copy is cleared and the session flipped to unauthenticated
/// even when the server-side teardown fails.
async fn logout(State(state): State<AuthState>, headers: HeaderMap) -> impl IntoResponse {
    if let Err(e) = state.upstream.logout(auth_token(&headers)).await {
        warn!(error = %e, "Upstream logout failed; clearing local session anyway");
    }

    state.session.set_unauthenticated();

    let cleared: Vec<_> = clear_auth_cookies(state.secure_cookies)
        .into_iter()
        .map(|value| (SET_COOKIE, value))
        .collect();

    (AppendHeaders(cleared), Redirect::to(LOGIN_PATH))
}
