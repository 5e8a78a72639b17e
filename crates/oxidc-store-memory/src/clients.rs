//! In-memory client registry.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use oxidc_auth::AuthResult;
use oxidc_auth::error::AuthError;
use oxidc_auth::storage::ClientStore;
use oxidc_auth::types::Client;

/// Clients keyed by `client_id`.
#[derive(Default)]
pub struct MemoryClientStore {
    clients: RwLock<HashMap<String, Client>>,
}

impl MemoryClientStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn get(&self, client_id: &str) -> AuthResult<Option<Client>> {
        Ok(self.clients.read().await.get(client_id).cloned())
    }

    async fn save(&self, client: &Client) -> AuthResult<()> {
        // duplicate check and insert share one write lock
        let mut clients = self.clients.write().await;
        if clients.contains_key(&client.client_id) {
            return Err(AuthError::storage(format!(
                "client already registered: {}",
                client.client_id
            )));
        }
        clients.insert(client.client_id.clone(), client.clone());
        Ok(())
    }

    async fn list(&self) -> AuthResult<Vec<Client>> {
        let mut all: Vec<Client> = self.clients.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.client_id.cmp(&b.client_id));
        Ok(all)
    }

    async fn remove(&self, client_id: &str) -> AuthResult<()> {
        self.clients.write().await.remove(client_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_get_remove() {
        let store = MemoryClientStore::new();
        store.save(&Client::new("app-a")).await.unwrap();
        store.save(&Client::new("app-b")).await.unwrap();

        assert!(store.get("app-a").await.unwrap().is_some());
        assert_eq!(store.list().await.unwrap().len(), 2);

        store.remove("app-a").await.unwrap();
        assert!(store.get("app-a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = MemoryClientStore::new();
        store.save(&Client::new("app")).await.unwrap();
        assert!(store.save(&Client::new("app")).await.is_err());
    }
}
