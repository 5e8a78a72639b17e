//! Pending authorization state.
//!
//! The in-progress OIDC request parameters are carried on a cookie across
//! the consent round trip rather than persisted server-side. Each visit to
//! the consent entry point merges any new query parameters over the cookie
//! and redirects back to the clean, parameter-free consent URL, so the
//! cookie stays the single source of truth.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// The merged authorization-request parameters for the current attempt.
///
/// Valid iff the four required fields are non-empty; `state` and `nonce`
/// are optional pass-throughs. Round-trips losslessly through a query
/// string (the cookie value).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAuthorizationState {
    /// Requested response type (`code` for the supported flow).
    #[serde(default)]
    pub response_type: String,

    /// The requesting client.
    #[serde(default)]
    pub client_id: String,

    /// Requested scopes, space-separated.
    #[serde(default)]
    pub scope: String,

    /// Where the authorization code will be delivered.
    #[serde(default)]
    pub redirect_uri: String,

    /// Opaque client state, echoed back on the code redirect.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,

    /// OIDC nonce, carried through to token issuance.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nonce: String,
}

impl PendingAuthorizationState {
    /// Parses a query string (with or without a leading `?`).
    ///
    /// Unknown keys are ignored; missing keys default to empty. An
    /// undecodable string maps to `InvalidPendingState`.
    pub fn from_query(query: &str) -> Result<Self, AuthError> {
        let query = query.trim_start_matches('?');
        serde_urlencoded::from_str(query)
            .map_err(|e| AuthError::invalid_pending_state(e.to_string()))
    }

    /// Serializes to a query string suitable for the cookie value or a
    /// redirect location. Empty optional fields are omitted.
    pub fn to_query(&self) -> Result<String, AuthError> {
        serde_urlencoded::to_string(self)
            .map_err(|e| AuthError::invalid_pending_state(e.to_string()))
    }

    /// Merges `other` over `self`: a non-empty incoming value wins, an
    /// empty one leaves the existing value in place.
    pub fn merge(&mut self, other: &Self) {
        fallback(&mut self.response_type, &other.response_type);
        fallback(&mut self.client_id, &other.client_id);
        fallback(&mut self.scope, &other.scope);
        fallback(&mut self.redirect_uri, &other.redirect_uri);
        fallback(&mut self.state, &other.state);
        fallback(&mut self.nonce, &other.nonce);
    }

    /// Returns `true` if all four required fields are present.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.response_type.is_empty()
            && !self.client_id.is_empty()
            && !self.scope.is_empty()
            && !self.redirect_uri.is_empty()
    }
}

fn fallback(current: &mut String, incoming: &str) {
    if !incoming.is_empty() {
        *current = incoming.to_string();
    }
}
