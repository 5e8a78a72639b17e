//! In-memory consent grant store with offset-cursor pagination.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use oxidc_auth::AuthResult;
use oxidc_auth::error::AuthError;
use oxidc_auth::storage::{ConsentPage, ConsentStore};
use oxidc_auth::types::ClientAuthorization;

const DEFAULT_PAGE_SIZE: usize = 100;

/// Grants keyed by `(user_id, client_id)`.
///
/// Enumeration sorts matches before slicing, so a cursor stays stable as
/// long as the underlying set does not change between pages. Cursors are
/// plain offsets into that sorted view.
pub struct MemoryConsentStore {
    grants: RwLock<HashMap<(String, String), ClientAuthorization>>,
    page_size: usize,
}

impl Default for MemoryConsentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryConsentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Overrides the page size, mainly for pagination tests.
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            grants: RwLock::new(HashMap::new()),
            page_size: page_size.max(1),
        }
    }

    fn page_of(&self, mut matches: Vec<ClientAuthorization>, cursor: Option<&str>) -> AuthResult<ConsentPage> {
        matches.sort_by(|a, b| {
            (a.user_id.as_str(), a.client_id.as_str())
                .cmp(&(b.user_id.as_str(), b.client_id.as_str()))
        });

        let offset = match cursor {
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| AuthError::storage(format!("bad pagination cursor: {cursor:?}")))?,
            None => 0,
        };

        let end = (offset + self.page_size).min(matches.len());
        let items = matches
            .get(offset..end)
            .unwrap_or_default()
            .to_vec();
        let next_cursor = (end < matches.len()).then(|| end.to_string());
        Ok(ConsentPage { items, next_cursor })
    }
}

#[async_trait]
impl ConsentStore for MemoryConsentStore {
    async fn save(&self, grant: &ClientAuthorization) -> AuthResult<()> {
        self.grants.write().await.insert(
            (grant.user_id.clone(), grant.client_id.clone()),
            grant.clone(),
        );
        Ok(())
    }

    async fn get(
        &self,
        user_id: &str,
        client_id: &str,
    ) -> AuthResult<Option<ClientAuthorization>> {
        Ok(self
            .grants
            .read()
            .await
            .get(&(user_id.to_string(), client_id.to_string()))
            .cloned())
    }

    async fn delete(&self, user_id: &str, client_id: &str) -> AuthResult<()> {
        self.grants
            .write()
            .await
            .remove(&(user_id.to_string(), client_id.to_string()));
        Ok(())
    }

    async fn by_user(&self, user_id: &str, cursor: Option<&str>) -> AuthResult<ConsentPage> {
        let matches: Vec<ClientAuthorization> = self
            .grants
            .read()
            .await
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        self.page_of(matches, cursor)
    }

    async fn by_client(&self, client_id: &str, cursor: Option<&str>) -> AuthResult<ConsentPage> {
        let matches: Vec<ClientAuthorization> = self
            .grants
            .read()
            .await
            .values()
            .filter(|g| g.client_id == client_id)
            .cloned()
            .collect();
        self.page_of(matches, cursor)
    }
}

#[cfg(test)]
mod tests {
    use oxidc_auth::storage::collect_user_grants;

    use super::*;

    #[tokio::test]
    async fn test_save_is_upsert_per_pair() {
        let store = MemoryConsentStore::new();
        let first = ClientAuthorization::new("alice", "app");
        store.save(&first).await.unwrap();
        let second = ClientAuthorization::new("alice", "app");
        store.save(&second).await.unwrap();

        let loaded = store.get("alice", "app").await.unwrap().unwrap();
        assert_eq!(loaded.grant_id, second.grant_id);
    }

    #[tokio::test]
    async fn test_delete_deauthorizes() {
        let store = MemoryConsentStore::new();
        store
            .save(&ClientAuthorization::new("alice", "app"))
            .await
            .unwrap();
        store.delete("alice", "app").await.unwrap();
        assert!(store.get("alice", "app").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_by_user_pages_through_everything() {
        let store = MemoryConsentStore::with_page_size(2);
        for i in 0..5 {
            store
                .save(&ClientAuthorization::new("alice", format!("app-{i}")))
                .await
                .unwrap();
        }
        store
            .save(&ClientAuthorization::new("bob", "app-0"))
            .await
            .unwrap();

        let first = store.by_user("alice", None).await.unwrap();
        assert_eq!(first.items.len(), 2);
        let cursor = first.next_cursor.expect("more pages");

        let second = store.by_user("alice", Some(&cursor)).await.unwrap();
        assert_eq!(second.items.len(), 2);
        let cursor = second.next_cursor.expect("more pages");

        let last = store.by_user("alice", Some(&cursor)).await.unwrap();
        assert_eq!(last.items.len(), 1);
        assert!(last.next_cursor.is_none());

        let all = collect_user_grants(&store, "alice").await.unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|g| g.user_id == "alice"));
    }

    #[tokio::test]
    async fn test_by_client_filters() {
        let store = MemoryConsentStore::new();
        store
            .save(&ClientAuthorization::new("alice", "app"))
            .await
            .unwrap();
        store
            .save(&ClientAuthorization::new("bob", "app"))
            .await
            .unwrap();
        store
            .save(&ClientAuthorization::new("carol", "other"))
            .await
            .unwrap();

        let page = store.by_client("app", None).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_bad_cursor_is_a_storage_error() {
        let store = MemoryConsentStore::new();
        assert!(store.by_user("alice", Some("not-a-number")).await.is_err());
    }
}
