//! Route guard: path classification and the allow/redirect policy.
//!
//! The policy is a pure function of (path class, token freshness) so it
//! can be tested without a server; the middleware is a thin executor.
//! Freshness comes from the token's expiry claim alone - navigation never
//! waits on an upstream round trip.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::cookie::auth_token;
use crate::token;

/// Login page path.
pub const LOGIN_PATH: &str = "/login";

/// Where authenticated users land when they hit the login page.
pub const LANDING_PATH: &str = "/apps";

/// Admin section paths that require a fresh credential.
pub const PROTECTED_PATHS: [&str; 3] = ["/apps", "/dashboard", "/tweets"];

/// Static classification of a navigable path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Login,
    Protected,
    Unclassified,
}

/// What the guard does with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToLanding,
}

fn matches_section(path: &str, section: &str) -> bool {
    path == section
        || path
            .strip_prefix(section)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Classify a path. Pure function, evaluated on every request.
pub fn classify(path: &str) -> RouteClass {
    if matches_section(path, LOGIN_PATH) {
        RouteClass::Login
    } else if PROTECTED_PATHS
        .iter()
        .any(|section| matches_section(path, section))
    {
        RouteClass::Protected
    } else {
        RouteClass::Unclassified
    }
}

/// The allow/redirect policy. Stale or absent credentials are turned away
/// from protected sections; fresh credentials are turned away from login.
pub fn decide(class: RouteClass, token_fresh: bool) -> GuardDecision {
    match (class, token_fresh) {
        (RouteClass::Protected, false) => GuardDecision::RedirectToLogin,
        (RouteClass::Login, true) => GuardDecision::RedirectToLanding,
        _ => GuardDecision::Allow,
    }
}

/// Middleware enforcing the policy before the destination renders.
/// Every validation failure lands in the stale branch; no error escapes
/// this boundary.
pub async fn route_guard(request: Request, next: Next) -> Response {
    let fresh = !token::is_expired(auth_token(request.headers()));
    match decide(classify(request.uri().path()), fresh) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::RedirectToLogin => Redirect::temporary(LOGIN_PATH).into_response(),
        GuardDecision::RedirectToLanding => Redirect::temporary(LANDING_PATH).into_response(),
    }
}
