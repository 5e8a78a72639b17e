//! Session storage trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::Session;

/// Storage operations for login sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persists a session, replacing any prior record with the same id pair.
    async fn save(&self, session: &Session) -> AuthResult<()>;

    /// Loads a session by its id and owning user.
    async fn load(&self, session_id: &str, user_id: &str) -> AuthResult<Option<Session>>;

    /// Lists every session belonging to one user.
    async fn list_for_user(&self, user_id: &str) -> AuthResult<Vec<Session>>;
}
