//! Authorization code artifact.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A short-lived credential handed to the relying party at consent time and
/// redeemed once at the token endpoint.
///
/// The code string is `"{uuid-v7}.{uuid-v4}"`: the v7 half makes codes
/// time-orderable and lets [`created_at`](Self::created_at) recover the
/// creation instant from the code alone, the v4 half adds unguessable
/// entropy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationCode {
    /// Globally unique, time-orderable code value.
    pub code: String,

    /// The user who granted the authorization.
    pub user_id: String,

    /// The pending authorization state at consent time, serialized as a
    /// query string.
    pub oidc_params: String,

    /// Optional hard expiry for the code.
    #[serde(default)]
    pub expiry: Option<OffsetDateTime>,
}

impl AuthorizationCode {
    /// Mints a new code bound to `user_id` and the serialized pending state.
    #[must_use]
    pub fn new(user_id: impl Into<String>, oidc_params: impl Into<String>) -> Self {
        Self {
            code: format!("{}.{}", Uuid::now_v7(), Uuid::new_v4()),
            user_id: user_id.into(),
            oidc_params: oidc_params.into(),
            expiry: None,
        }
    }

    /// Recovers the creation instant embedded in the code's v7 segment.
    ///
    /// Returns `None` for codes that were not minted by [`new`](Self::new).
    #[must_use]
    pub fn created_at(&self) -> Option<OffsetDateTime> {
        let prefix = self.code.get(..36)?;
        let id = Uuid::parse_str(prefix).ok()?;
        let ts = id.get_timestamp()?;
        let (secs, nanos) = ts.to_unix();
        let base = OffsetDateTime::from_unix_timestamp(i64::try_from(secs).ok()?).ok()?;
        Some(base + time::Duration::nanoseconds(i64::from(nanos)))
    }

    /// Returns `true` if the code carries an expiry that has passed.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expiry.is_some_and(|exp| now > exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique_and_ordered() {
        let a = AuthorizationCode::new("alice", "client_id=app");
        let b = AuthorizationCode::new("alice", "client_id=app");
        assert_ne!(a.code, b.code);
        // v7 prefixes sort by creation time
        assert!(a.code[..36] <= b.code[..36]);
    }

    #[test]
    fn test_created_at_recoverable_from_code() {
        let before = OffsetDateTime::now_utc() - time::Duration::seconds(2);
        let code = AuthorizationCode::new("alice", "");
        let created = code.created_at().expect("v7 timestamp");
        let after = OffsetDateTime::now_utc() + time::Duration::seconds(2);
        assert!(created > before && created < after);
    }

    #[test]
    fn test_created_at_none_for_foreign_code() {
        let code = AuthorizationCode {
            code: "not-a-uuid".into(),
            user_id: "alice".into(),
            oidc_params: String::new(),
            expiry: None,
        };
        assert!(code.created_at().is_none());
    }

    #[test]
    fn test_expiry() {
        let now = OffsetDateTime::now_utc();
        let mut code = AuthorizationCode::new("alice", "");
        assert!(!code.is_expired(now));
        code.expiry = Some(now - time::Duration::minutes(1));
        assert!(code.is_expired(now));
    }
}
