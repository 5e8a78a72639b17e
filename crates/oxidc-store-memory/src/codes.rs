//! In-memory authorization code store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use oxidc_auth::AuthResult;
use oxidc_auth::storage::AuthorizationCodeStore;
use oxidc_auth::types::AuthorizationCode;

/// Codes keyed by their value.
#[derive(Default)]
pub struct MemoryCodeStore {
    codes: RwLock<HashMap<String, AuthorizationCode>>,
}

impl MemoryCodeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorizationCodeStore for MemoryCodeStore {
    async fn save(&self, code: &AuthorizationCode) -> AuthResult<()> {
        self.codes
            .write()
            .await
            .insert(code.code.clone(), code.clone());
        Ok(())
    }

    async fn get(&self, code: &str) -> AuthResult<Option<AuthorizationCode>> {
        Ok(self.codes.read().await.get(code).cloned())
    }

    async fn remove(&self, code: &str) -> AuthResult<Option<AuthorizationCode>> {
        Ok(self.codes.write().await.remove(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_get_remove() {
        let store = MemoryCodeStore::new();
        let code = AuthorizationCode::new("alice", "client_id=app");
        store.save(&code).await.unwrap();

        let loaded = store.get(&code.code).await.unwrap().unwrap();
        assert_eq!(loaded.user_id, "alice");

        let taken = store.remove(&code.code).await.unwrap().unwrap();
        assert_eq!(taken.code, code.code);
        assert!(store.get(&code.code).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_yields_the_code_exactly_once() {
        let store = MemoryCodeStore::new();
        let code = AuthorizationCode::new("alice", "client_id=app");
        store.save(&code).await.unwrap();

        assert!(store.remove(&code.code).await.unwrap().is_some());
        assert!(store.remove(&code.code).await.unwrap().is_none());
        assert!(store.remove("never-saved").await.unwrap().is_none());
    }
}
