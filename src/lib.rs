pub mod api;
pub mod auth;
pub mod cli;
pub mod pages;
pub mod session;
pub mod token;
pub mod upstream;

use api::create_api_router;
use auth::{LANDING_PATH, LOGIN_PATH, route_guard};
use axum::{Router, middleware, response::Redirect, routing::get};
use pages::{apps_page, dashboard_page, login_page, tweets_page};
use session::Session;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use upstream::AuthApi;
use url::Url;

pub struct ServerConfig {
    /// Base URL of the upstream admin REST API
    pub upstream: Url,
    /// Whether to set the Secure flag on cookies (should be true behind HTTPS)
    pub secure_cookies: bool,
}

/// Create the application router with the given configuration.
pub fn create_app(config: &ServerConfig) -> Router {
    let upstream = AuthApi::new(&config.upstream).expect("Failed to build upstream client");
    let session = Session::new();

    // One confirmation round trip at startup; subscribers see the loading
    // state until it resolves.
    {
        let session = session.clone();
        let api = upstream.clone();
        tokio::spawn(async move {
            session.initialize(&api, None).await;
        });
    }

    let api_router = create_api_router(upstream, session, config.secure_cookies);

    // Page routes run behind the route guard. The guard decision is local
    // and synchronous, so navigation never waits on the upstream.
    let page_routes = Router::new()
        .route(LOGIN_PATH, get(login_page))
        .route("/apps", get(apps_page))
        .route("/dashboard", get(dashboard_page))
        .route("/tweets", get(tweets_page))
        .layer(middleware::from_fn(route_guard));

    Router::new()
        .route("/", get(Redirect::temporary(LANDING_PATH)))
        .nest("/admin/auth", api_router)
        .merge(page_routes)
}

/// Run the server on the given listener. This function blocks until the server exits.
pub async fn run_server(config: ServerConfig, listener: TcpListener) -> Result<(), std::io::Error> {
    let app = create_app(&config);
    axum::serve(listener, app).await
}

/// Start the server on the given port in a background task. Use port 0 to let the OS choose a random port.
/// Returns the actual address the server is listening on.
/// Note: For production use, prefer `run_server` directly in main.
pub async fn start_server(
    config: ServerConfig,
    port: u16,
) -> (tokio::task::JoinHandle<()>, SocketAddr) {
    let addr = format!("127.0.0.1:{}", port);
    let listener = TcpListener::bind(&addr).await.expect("Failed to bind");
    let local_addr = listener.local_addr().expect("Failed to get local address");

    let handle = tokio::spawn(async move {
        run_server(config, listener).await.ok();
    });

    (handle, local_addr)
}
