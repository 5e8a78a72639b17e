//! JWT claim structures, signing and verification.
//!
//! Two token shapes exist: session tokens (id/access/login) and refresh
//! tokens. Both are RS512-signed with the kid of the signing key in the
//! header so verifiers can pick the right public key. Signing is
//! deterministic: the same claims under the same key always produce the
//! same compact token.
//!
//! Verification never fails loudly. A bad signature, an expired token or
//! an unknown kid all degrade to "not authenticated" (`None`); callers
//! decide whether that means a login redirect or a 400.

use jsonwebtoken::{Algorithm, Header, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::error::AuthError;
use crate::keys::SigningKey;
use crate::types::Session;

/// Claims carried by id, access and login tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokenClaims {
    /// Issuer URL.
    pub iss: String,
    /// Audience: the client id the token was minted for.
    pub aud: String,
    /// Subject: the user id.
    pub sub: String,
    /// Session id, stable across refreshes of the same session.
    pub sid: String,
    /// Not-before, unix seconds.
    pub nbf: i64,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number_verified: Option<bool>,
}

impl SessionTokenClaims {
    /// Builds claims for `session` issued at `now`, expiring after `ttl`.
    #[must_use]
    pub fn for_session(
        issuer: &str,
        audience: &str,
        session: &Session,
        now: OffsetDateTime,
        ttl: Duration,
    ) -> Self {
        let iat = now.unix_timestamp();
        Self {
            iss: issuer.to_string(),
            aud: audience.to_string(),
            sub: session.user_id.clone(),
            sid: session.session_id.clone(),
            nbf: iat,
            iat,
            exp: (now + ttl).unix_timestamp(),
            name: None,
            email: None,
            email_verified: None,
            phone_number: None,
            phone_number_verified: None,
        }
    }

    /// Expiry as an [`OffsetDateTime`].
    pub fn expiry(&self) -> Result<OffsetDateTime, AuthError> {
        OffsetDateTime::from_unix_timestamp(self.exp)
            .map_err(|e| AuthError::signing(e.to_string()))
    }
}

/// Claims carried by refresh tokens.
///
/// A refresh token has no subject; it names the session and a one-shot
/// refresh code that the session store must confirm before the session
/// token is re-issued. Its window starts shortly before the session token
/// expires and runs for the configured tail beyond it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    /// Issuer URL.
    pub iss: String,
    /// Audience: the client id the paired session token was minted for.
    pub aud: String,
    /// Session id this token may refresh.
    pub sid: String,
    /// One-shot code matched against the stored session.
    pub refresh_code: String,
    /// Not-before, unix seconds.
    pub nbf: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

impl RefreshTokenClaims {
    /// Builds refresh claims paired with a session token expiring at
    /// `session_exp`. Usable from one hour before that expiry until
    /// `tail` after it.
    #[must_use]
    pub fn for_session(
        issuer: &str,
        audience: &str,
        session: &Session,
        session_exp: OffsetDateTime,
        tail: Duration,
    ) -> Self {
        Self {
            iss: issuer.to_string(),
            aud: audience.to_string(),
            sid: session.session_id.clone(),
            refresh_code: session.refresh_code.clone(),
            nbf: (session_exp - Duration::hours(1)).unix_timestamp(),
            exp: (session_exp + tail).unix_timestamp(),
        }
    }
}

/// Signs `claims` with `key`, embedding the kid in the header.
pub fn sign<T: Serialize>(key: &SigningKey, claims: &T) -> Result<String, AuthError> {
    let mut header = Header::new(Algorithm::RS512);
    header.kid = Some(key.kid.clone());
    jsonwebtoken::encode(&header, claims, &key.encoding_key()?)
        .map_err(|e| AuthError::signing(e.to_string()))
}

/// Extracts the kid from a token header without verifying the signature.
///
/// Returns `None` on any malformed input.
#[must_use]
pub fn peek_kid(token: &str) -> Option<String> {
    jsonwebtoken::decode_header(token).ok().and_then(|h| h.kid)
}

/// Verifies `token` against `key` and deserializes its claims.
///
/// Any failure (signature, expiry, shape) yields `None`.
#[must_use]
pub fn verify<T: DeserializeOwned>(key: &SigningKey, token: &str) -> Option<T> {
    let decoding_key = key.decoding_key().ok()?;
    let mut validation = Validation::new(Algorithm::RS512);
    // Audience is checked by callers against the pending request, not here.
    validation.validate_aud = false;
    jsonwebtoken::decode::<T>(token, &decoding_key, &validation)
        .ok()
        .map(|data| data.claims)
}
