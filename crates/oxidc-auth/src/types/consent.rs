//! Consent grant record.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A persisted record that a user has approved a client.
///
/// At most one live record exists per `(user_id, client_id)` pair. The
/// record survives until the user deauthorizes the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientAuthorization {
    /// The approved client.
    pub client_id: String,

    /// The approving user.
    pub user_id: String,

    /// When consent was first granted.
    pub authorized_at: OffsetDateTime,

    /// When tokens were last refreshed under this grant.
    pub last_refreshed_at: OffsetDateTime,

    /// Stable identifier for this grant.
    pub grant_id: String,
}

impl ClientAuthorization {
    /// Creates a fresh grant for `(user_id, client_id)` stamped `now`.
    #[must_use]
    pub fn new(user_id: impl Into<String>, client_id: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            client_id: client_id.into(),
            user_id: user_id.into(),
            authorized_at: now,
            last_refreshed_at: now,
            grant_id: Uuid::new_v4().to_string(),
        }
    }
}
