//! Bearer token expiry validation.
//!
//! The gateway never verifies token signatures - the upstream authority
//! issues and checks credentials. Route gating only needs the embedded
//! `exp` claim, so decoding skips signature validation and any failure
//! is treated as expired (fail closed).

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// The single claim the gateway reads from a credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiryClaims {
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Decode the expiry claim without verifying the signature.
fn decode_claims(token: &str) -> Result<ExpiryClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    // Expiry is compared against an explicit clock in `is_expired_at`,
    // not by the decoder.
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data =
        jsonwebtoken::decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

/// Whether the credential is expired at the given instant.
/// Absent, unparseable, or malformed tokens are expired.
/// Pure and deterministic given the token and the clock; no network access.
pub fn is_expired_at(token: Option<&str>, now: u64) -> bool {
    match token {
        Some(token) => match decode_claims(token) {
            Ok(claims) => claims.exp <= now,
            Err(_) => true,
        },
        None => true,
    }
}

/// Whether the credential is expired right now. A clock error fails closed.
pub fn is_expired(token: Option<&str>) -> bool {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(now) => is_expired_at(token, now.as_secs()),
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};

    const NOW: u64 = 1_700_000_000;

    fn mint(exp: u64) -> String {
        let claims = ExpiryClaims { exp };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_token_expiring_before_now_is_expired() {
        let token = mint(NOW - 50);
        assert!(is_expired_at(Some(&token), NOW));
    }

    #[test]
    fn test_token_expiring_after_now_is_fresh() {
        let token = mint(NOW + 300);
        assert!(!is_expired_at(Some(&token), NOW));
    }

    #[test]
    fn test_token_expiring_exactly_now_is_expired() {
        let token = mint(NOW);
        assert!(is_expired_at(Some(&token), NOW));
    }

    #[test]
    fn test_absent_token_is_expired() {
        assert!(is_expired_at(None, NOW));
        assert!(is_expired(None));
    }

    #[test]
    fn test_unparseable_token_is_expired() {
        assert!(is_expired_at(Some("not-a-token"), NOW));
        assert!(is_expired_at(Some(""), NOW));
        assert!(is_expired_at(Some("a.b.c"), NOW));
    }

    #[test]
    fn test_missing_exp_claim_is_expired() {
        let claims = serde_json::json!({ "sub": "admin" });
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(is_expired_at(Some(&token), NOW));
    }

    #[test]
    fn test_non_numeric_exp_claim_is_expired() {
        let claims = serde_json::json!({ "exp": "tomorrow" });
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(is_expired_at(Some(&token), NOW));
    }

    #[test]
    fn test_signature_is_not_checked() {
        // The gateway does not hold the signing secret, so a fresh token
        // signed with any key must decode as fresh.
        let token = mint(NOW + 300);
        let (head_and_body, _sig) = token.rsplit_once('.').unwrap();
        let tampered = format!("{}.AAAA", head_and_body);

        assert!(!is_expired_at(Some(&tampered), NOW));
    }
}
