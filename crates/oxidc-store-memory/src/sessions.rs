//! In-memory session store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use oxidc_auth::AuthResult;
use oxidc_auth::storage::SessionStore;
use oxidc_auth::types::Session;

/// Sessions keyed by `(session_id, user_id)`.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<(String, String), Session>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, session: &Session) -> AuthResult<()> {
        self.sessions.write().await.insert(
            (session.session_id.clone(), session.user_id.clone()),
            session.clone(),
        );
        Ok(())
    }

    async fn load(&self, session_id: &str, user_id: &str) -> AuthResult<Option<Session>> {
        Ok(self
            .sessions
            .read()
            .await
            .get(&(session_id.to_string(), user_id.to_string()))
            .cloned())
    }

    async fn list_for_user(&self, user_id: &str) -> AuthResult<Vec<Session>> {
        let mut sessions: Vec<Session> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(sessions)
    }
}
