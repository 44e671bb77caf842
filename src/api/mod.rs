mod auth;
mod error;

use axum::Router;

use crate::session::Session;
use crate::upstream::AuthApi;

pub use auth::AuthState;
pub use error::{ApiError, ResultExt};

/// Create the auth API router, mounted under `/admin/auth`.
pub fn create_api_router(upstream: AuthApi, session: Session, secure_cookies: bool) -> Router {
    auth::router(AuthState {
        upstream,
        session,
        secure_cookies,
    })
}
