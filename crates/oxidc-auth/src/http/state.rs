//! Shared handler state.

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::keys::KeyManager;
use crate::storage::{
    AuthorizationCodeStore, ClientStore, ConsentStore, KeyStore, SessionStore, UserStore,
};
use crate::users::UserService;

use super::pages::PageRenderer;

/// Everything the handlers need, cloneable per request.
#[derive(Clone)]
pub struct OidcState {
    pub config: Arc<AuthConfig>,
    pub clients: Arc<dyn ClientStore>,
    pub codes: Arc<dyn AuthorizationCodeStore>,
    pub consents: Arc<dyn ConsentStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub users: UserService,
    pub keys: KeyManager,
    pub pages: Arc<dyn PageRenderer>,
}

impl OidcState {
    /// Wires the handler state over a set of stores and a page renderer.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        config: AuthConfig,
        clients: Arc<dyn ClientStore>,
        codes: Arc<dyn AuthorizationCodeStore>,
        consents: Arc<dyn ConsentStore>,
        sessions: Arc<dyn SessionStore>,
        user_store: Arc<dyn UserStore>,
        key_store: Arc<dyn KeyStore>,
        pages: Arc<dyn PageRenderer>,
    ) -> Self {
        let keys = KeyManager::new(key_store, &config);
        Self {
            config: Arc::new(config),
            clients,
            codes,
            consents,
            sessions,
            users: UserService::new(user_store),
            keys,
            pages,
        }
    }
}
