//! Server-side login session record.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A persisted login session.
///
/// The session itself is not a token: it is the server-side anchor that
/// refresh tokens are checked against. `refresh_code` rotates on every
/// refresh-token issuance and must match the claim embedded in the
/// presented refresh token for the refresh to be accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier, embedded as the `sid` claim.
    pub session_id: String,

    /// The user this session belongs to.
    pub user_id: String,

    /// When the session was established.
    pub created: OffsetDateTime,

    /// When tokens were last issued under this session.
    pub refreshed: OffsetDateTime,

    /// Number of token issuances under this session.
    pub issue_counter: i64,

    /// One-time code that the next refresh token must carry.
    pub refresh_code: String,
}

impl Session {
    /// Establishes a fresh session for `user_id`.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            created: now,
            refreshed: now,
            issue_counter: 1,
            refresh_code: Uuid::new_v4().to_string(),
        }
    }

    /// Rotates the refresh code for a new refresh-token issuance and
    /// returns the fresh code.
    ///
    /// The previous code stops being honored the moment the rotated session
    /// is saved.
    pub fn rotate_refresh_code(&mut self) -> String {
        self.refresh_code = Uuid::new_v4().to_string();
        self.issue_counter += 1;
        self.refreshed = OffsetDateTime::now_utc();
        self.refresh_code.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_bound_to_user() {
        let session = Session::new("alice");
        assert_eq!(session.user_id, "alice");
        assert_eq!(session.issue_counter, 1);
        assert!(!session.session_id.is_empty());
        assert!(!session.refresh_code.is_empty());
    }

    #[test]
    fn test_rotation_replaces_code_and_counts() {
        let mut session = Session::new("alice");
        let first = session.refresh_code.clone();
        let second = session.rotate_refresh_code();
        assert_ne!(first, second);
        assert_eq!(session.refresh_code, second);
        assert_eq!(session.issue_counter, 2);
    }
}
