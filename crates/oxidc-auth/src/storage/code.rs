//! Authorization code storage trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::AuthorizationCode;

/// Storage operations for authorization codes.
///
/// Codes are single-use: the exchange path redeems a code through `remove`,
/// which must atomically delete and return it so that two concurrent
/// redemptions cannot both see the same code.
#[async_trait]
pub trait AuthorizationCodeStore: Send + Sync {
    /// Persists a freshly minted code.
    async fn save(&self, code: &AuthorizationCode) -> AuthResult<()>;

    /// Looks up a code by its value. `None` if unknown or already redeemed.
    async fn get(&self, code: &str) -> AuthResult<Option<AuthorizationCode>>;

    /// Deletes a code, returning it if it was present. At most one caller
    /// observes `Some` for a given code.
    async fn remove(&self, code: &str) -> AuthResult<Option<AuthorizationCode>>;
}
