//! Consent grant storage trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::ClientAuthorization;

/// One page of a consent enumeration.
///
/// Enumeration is pull-based: the consumer asks for the next page with the
/// returned cursor and simply stops asking to cancel. A `None` cursor means
/// the enumeration is exhausted. Cursors are only meaningful within the
/// query that produced them; restarting requires a fresh query.
#[derive(Debug, Clone)]
pub struct ConsentPage {
    /// The grants in this page.
    pub items: Vec<ClientAuthorization>,
    /// Cursor for the next page, `None` at the end.
    pub next_cursor: Option<String>,
}

impl ConsentPage {
    /// An empty, exhausted page.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }
}

/// Storage operations for consent grants.
///
/// At most one live record exists per `(user_id, client_id)`; `save`
/// overwrites any previous record for the pair.
#[async_trait]
pub trait ConsentStore: Send + Sync {
    /// Persists (or replaces) a grant.
    async fn save(&self, grant: &ClientAuthorization) -> AuthResult<()>;

    /// Looks up the grant for a `(user, client)` pair.
    async fn get(&self, user_id: &str, client_id: &str)
    -> AuthResult<Option<ClientAuthorization>>;

    /// Deletes the grant for a `(user, client)` pair ("deauthorize").
    async fn delete(&self, user_id: &str, client_id: &str) -> AuthResult<()>;

    /// Enumerates a user's grants one page at a time.
    async fn by_user(&self, user_id: &str, cursor: Option<&str>) -> AuthResult<ConsentPage>;

    /// Enumerates a client's grants one page at a time. Can be very large;
    /// callers should not depaginate blindly.
    async fn by_client(&self, client_id: &str, cursor: Option<&str>) -> AuthResult<ConsentPage>;
}

/// Drains the by-user enumeration into a single vector.
///
/// Convenience for the consent screen, where a user's grant list is small.
pub async fn collect_user_grants(
    store: &dyn ConsentStore,
    user_id: &str,
) -> AuthResult<Vec<ClientAuthorization>> {
    let mut grants = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = store.by_user(user_id, cursor.as_deref()).await?;
        grants.extend(page.items);
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => return Ok(grants),
        }
    }
}
