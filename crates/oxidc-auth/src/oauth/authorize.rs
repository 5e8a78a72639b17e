//! Admission of an inbound authorization request.

use crate::error::AuthError;
use crate::oauth::redirect::is_valid_redirect_uri;
use crate::params::PendingAuthorizationState;
use crate::storage::ClientStore;

/// Admits an authorization request and returns the consent entry URL the
/// caller should redirect to.
///
/// There is no auto-approval path: even a user with an existing grant goes
/// through the consent screen, so a hostile link can never complete a
/// zero-click login.
pub async fn begin_authorization(
    clients: &dyn ClientStore,
    pending: &PendingAuthorizationState,
) -> Result<String, AuthError> {
    let client = clients
        .get(&pending.client_id)
        .await?
        .ok_or_else(|| AuthError::client_not_found(&pending.client_id))?;

    if !is_valid_redirect_uri(&client, &pending.redirect_uri) {
        tracing::warn!(
            client_id = %client.client_id,
            redirect_uri = %pending.redirect_uri,
            "rejected redirect uri"
        );
        return Err(AuthError::invalid_redirect_uri(&pending.redirect_uri));
    }

    Ok(format!("/accept?{}", pending.to_query()?))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::AuthResult;
    use crate::types::Client;

    #[derive(Default)]
    struct MapClientStore {
        clients: Mutex<HashMap<String, Client>>,
    }

    #[async_trait]
    impl ClientStore for MapClientStore {
        async fn get(&self, client_id: &str) -> AuthResult<Option<Client>> {
            Ok(self.clients.lock().unwrap().get(client_id).cloned())
        }

        async fn save(&self, client: &Client) -> AuthResult<()> {
            let mut clients = self.clients.lock().unwrap();
            if clients.contains_key(&client.client_id) {
                return Err(AuthError::storage("duplicate client id"));
            }
            clients.insert(client.client_id.clone(), client.clone());
            Ok(())
        }

        async fn list(&self) -> AuthResult<Vec<Client>> {
            Ok(self.clients.lock().unwrap().values().cloned().collect())
        }

        async fn remove(&self, client_id: &str) -> AuthResult<()> {
            self.clients.lock().unwrap().remove(client_id);
            Ok(())
        }
    }

    fn pending() -> PendingAuthorizationState {
        PendingAuthorizationState {
            response_type: "code".into(),
            client_id: "my-app".into(),
            scope: "openid".into(),
            redirect_uri: "https://app.example.com/callback".into(),
            state: "s1".into(),
            nonce: String::new(),
        }
    }

    async fn store_with_client() -> MapClientStore {
        let store = MapClientStore::default();
        let client = Client::new("my-app").with_redirect_uris(
            crate::types::RedirectUriMode::Prefix,
            vec!["https://app.example.com/".into()],
        );
        store.save(&client).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_admitted_request_redirects_to_consent() {
        let store = store_with_client().await;
        let target = begin_authorization(&store, &pending()).await.unwrap();
        assert!(target.starts_with("/accept?"), "{target}");
        assert!(target.contains("client_id=my-app"));
        assert!(target.contains("state=s1"));
    }

    #[tokio::test]
    async fn test_unknown_client_rejected() {
        let store = MapClientStore::default();
        let err = begin_authorization(&store, &pending()).await.unwrap_err();
        assert!(matches!(err, AuthError::ClientNotFound { .. }));
    }

    #[tokio::test]
    async fn test_disallowed_redirect_rejected() {
        let store = store_with_client().await;
        let mut request = pending();
        request.redirect_uri = "https://evil.example.com/".into();
        let err = begin_authorization(&store, &request).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidRedirectUri { .. }));
    }
}
