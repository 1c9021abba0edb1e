//! Role-claim extraction from bearer tokens.
//!
//! A token is treated as three dot-separated segments. The middle segment is
//! base64url-decoded and parsed as JSON; the `role` field becomes the derived
//! role. Nothing is verified locally — no signature check, no expiry check.
//! The result gates which operations the client will attempt, and that is
//! all; the server re-checks authorization on every protected request, so a
//! forged claim only buys a request the server rejects.
//!
//! Any failure along the way (wrong segment count, bad base64, bad JSON,
//! unknown role string) yields `None`, never an error.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::model::Role;

/// The claims this client cares about. Everything else in the payload is
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Decode the payload segment of a three-segment token.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return None,
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// The derived role, if the token carries a recognizable one.
pub fn role_claim(token: &str) -> Option<Role> {
    decode_claims(token)?.role.as_deref().and_then(Role::from_claim)
}
