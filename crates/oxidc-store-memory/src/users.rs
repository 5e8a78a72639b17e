//! In-memory user store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use oxidc_auth::AuthResult;
use oxidc_auth::storage::UserStore;
use oxidc_auth::types::OidcUser;

/// Users keyed by id.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, OidcUser>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, user_id: &str) -> AuthResult<Option<OidcUser>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn save(&self, user: &OidcUser) -> AuthResult<()> {
        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_get() {
        let store = MemoryUserStore::new();
        let user = OidcUser {
            id: "alice".into(),
            salt: "bcrypt:0123456789abcdef".into(),
            encoded_password: "$2b$12$...".into(),
        };
        store.save(&user).await.unwrap();

        let loaded = store.get("alice").await.unwrap().unwrap();
        assert_eq!(loaded.salt, user.salt);
        assert!(store.get("bob").await.unwrap().is_none());
    }
}
