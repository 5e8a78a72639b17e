//! Signing key storage trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::keys::SigningKey;

/// Storage operations for signing keys.
///
/// Enumeration order matters: the key manager picks the first in-window
/// key `list_kids` yields, so backends should enumerate in a stable order
/// (insertion order for the in-memory store).
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Lists every stored key id.
    async fn list_kids(&self) -> AuthResult<Vec<String>>;

    /// Fetches a key by id.
    async fn get(&self, kid: &str) -> AuthResult<Option<SigningKey>>;

    /// Persists a key.
    async fn save(&self, key: &SigningKey) -> AuthResult<()>;
}
