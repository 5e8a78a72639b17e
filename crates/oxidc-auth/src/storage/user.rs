//! User storage trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::OidcUser;

/// Storage operations for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetches a user by id.
    async fn get(&self, user_id: &str) -> AuthResult<Option<OidcUser>>;

    /// Persists a user, replacing any prior record with the same id.
    async fn save(&self, user: &OidcUser) -> AuthResult<()>;
}
