//! Credential cookie storage.
//!
//! All reads and writes of the admin credential go through this module;
//! the route guard and the auth endpoints never touch headers directly.

use axum::http::header;

/// Well-known cookie name for the admin credential.
pub const AUTH_COOKIE_NAME: &str = "rise_admin_auth";

/// Cookie names left over from earlier deployments. Logout clears these
/// too so a key-naming migration never strands a stale credential.
pub const LEGACY_COOKIE_NAMES: [&str; 2] = ["adminToken", "rise_token"];

/// Extract a cookie value from the Cookie header.
pub fn get_cookie<'a>(headers: &'a axum::http::HeaderMap, name: &str) -> Option<&'a str> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    for part in cookie_header.split(';') {
        let part = part.trim();
        if let Some((key, value)) = part.split_once('=') {
            if key.trim() == name {
                return Some(value.trim());
            }
        }
    }
    None
}

/// The current credential, or absent.
pub fn auth_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    get_cookie(headers, AUTH_COOKIE_NAME)
}

/// Build the Set-Cookie value that persists the credential. Path-wide
/// scope and no Max-Age: the token's own expiry claim bounds the session,
/// not the cookie lifetime.
pub fn set_auth_cookie(token: &str, secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/{}",
        AUTH_COOKIE_NAME, token, secure
    )
}

/// Set-Cookie values clearing the credential under every known name.
/// Clearing an absent cookie is a no-op, so this is idempotent.
pub fn clear_auth_cookies(secure: bool) -> Vec<String> {
    let secure = if secure { "; Secure" } else { "" };
    std::iter::once(AUTH_COOKIE_NAME)
        .chain(LEGACY_COOKIE_NAMES)
        .map(|name| {
            format!(
                "{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0{}",
                name, secure
            )
        })
        .collect()
}
