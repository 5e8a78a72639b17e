//! Client storage trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::Client;

/// Storage operations for registered relying-party clients.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Looks up a client by its id. `None` if not registered.
    async fn get(&self, client_id: &str) -> AuthResult<Option<Client>>;

    /// Persists a new client.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a client with the same `client_id`
    /// already exists or the write fails. Backends must make the
    /// duplicate check a conditional write.
    async fn save(&self, client: &Client) -> AuthResult<()>;

    /// Lists every registered client.
    async fn list(&self) -> AuthResult<Vec<Client>>;

    /// Removes a client registration.
    async fn remove(&self, client_id: &str) -> AuthResult<()>;
}
