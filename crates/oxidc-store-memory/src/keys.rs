//! In-memory signing key store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use oxidc_auth::AuthResult;
use oxidc_auth::keys::SigningKey;
use oxidc_auth::storage::KeyStore;

/// Keys in insertion order.
///
/// The key manager honors the first in-window key the store enumerates,
/// so a `Vec` rather than a map keeps selection deterministic.
#[derive(Default)]
pub struct MemoryKeyStore {
    keys: RwLock<Vec<SigningKey>>,
}

impl MemoryKeyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn list_kids(&self) -> AuthResult<Vec<String>> {
        Ok(self.keys.read().await.iter().map(|k| k.kid.clone()).collect())
    }

    async fn get(&self, kid: &str) -> AuthResult<Option<SigningKey>> {
        Ok(self.keys.read().await.iter().find(|k| k.kid == kid).cloned())
    }

    async fn save(&self, key: &SigningKey) -> AuthResult<()> {
        let mut keys = self.keys.write().await;
        if let Some(existing) = keys.iter_mut().find(|k| k.kid == key.kid) {
            *existing = key.clone();
        } else {
            keys.push(key.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime};

    use super::*;

    fn key() -> SigningKey {
        SigningKey::generate(OffsetDateTime::now_utc(), 512, Duration::days(30)).unwrap()
    }

    #[tokio::test]
    async fn test_enumeration_preserves_insertion_order() {
        let store = MemoryKeyStore::new();
        let first = key();
        let second = key();
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        let kids = store.list_kids().await.unwrap();
        assert_eq!(kids, vec![first.kid.clone(), second.kid.clone()]);
        assert!(store.get(&first.kid).await.unwrap().is_some());
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resave_replaces_in_place() {
        let store = MemoryKeyStore::new();
        let mut k = key();
        store.save(&k).await.unwrap();
        k.expiry = k.expiry + Duration::days(1);
        store.save(&k).await.unwrap();

        assert_eq!(store.list_kids().await.unwrap().len(), 1);
        let loaded = store.get(&k.kid).await.unwrap().unwrap();
        assert_eq!(loaded.expiry, k.expiry);
    }
}
