//! CLI argument parsing, validation, and startup helpers.

use crate::ServerConfig;
use clap::Parser;
use tracing::error;
use url::Url;

#[derive(clap::ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "risegate",
    about = "Session gateway for the Rise admin dashboard"
)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "7310")]
    pub port: u16,

    /// Base URL of the upstream admin REST API
    #[arg(
        short,
        long,
        env = "RISEGATE_UPSTREAM",
        default_value = "http://localhost:3300/api/v1"
    )]
    pub upstream: String,

    /// Set the Secure flag on credential cookies (enable behind HTTPS)
    #[arg(long)]
    pub secure_cookies: bool,

    /// Log output format
    #[arg(short, long, default_value = "pretty")]
    pub log_format: LogFormat,
}

/// Initialize logging based on the specified format.
pub fn init_logging(format: &LogFormat) {
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt::init(),
        LogFormat::Json => tracing_subscriber::fmt().json().init(),
        LogFormat::Compact => tracing_subscriber::fmt().compact().init(),
    }
}

/// Parse and validate the upstream base URL.
/// Returns None and logs an error if validation fails.
pub fn validate_upstream(upstream: &str) -> Option<Url> {
    let url = match Url::parse(upstream) {
        Ok(url) => url,
        Err(e) => {
            error!(upstream = %upstream, error = %e, "Invalid upstream URL");
            return None;
        }
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        error!(upstream = %upstream, "Upstream URL must use http or https");
        return None;
    }

    Some(url)
}

/// Build ServerConfig from validated arguments.
pub fn build_config(upstream: Url, secure_cookies: bool) -> ServerConfig {
    ServerConfig {
        upstream,
        secure_cookies,
    }
}
