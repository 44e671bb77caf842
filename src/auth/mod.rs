//! Session gate: credential cookie storage and the route guard.
//!
//! The credential is an opaque bearer token issued by the upstream
//! authority. The guard decides allow/redirect locally from the token's
//! expiry claim; server-side confirmation happens separately through the
//! session layer.

mod cookie;
mod guard;

pub use cookie::{
    AUTH_COOKIE_NAME, LEGACY_COOKIE_NAMES, auth_token, clear_auth_cookies, get_cookie,
    set_auth_cookie,
};
pub use guard::{
    GuardDecision, LANDING_PATH, LOGIN_PATH, PROTECTED_PATHS, RouteClass, classify, decide,
    route_guard,
};
