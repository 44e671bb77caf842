//! Embedded page shells for the admin sections.
//!
//! The dashboard frontend owns real rendering; these exist so the route
//! guard has destinations to protect.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;

/// Admin page shells.
#[derive(Embed)]
#[folder = "assets/"]
pub struct PageAssets;

/// HTML is always revalidated so a guard decision is never served stale.
const NO_CACHE: &str = "no-cache";

fn serve_page(name: &str) -> Response {
    match PageAssets::get(name) {
        Some(content) => (
            [
                (header::CONTENT_TYPE, "text/html"),
                (header::CACHE_CONTROL, NO_CACHE),
            ],
            content.data,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn login_page() -> Response {
    serve_page("login.html")
}

pub async fn apps_page() -> Response {
    serve_page("apps.html")
}

pub async fn dashboard_page() -> Response {
    serve_page("dashboard.html")
}

pub async fn tweets_page() -> Response {
    serve_page("tweets.html")
}
