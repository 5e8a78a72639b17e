//! In-memory storage backend for the oxidc authorization core.
//!
//! Implements every persistence contract from `oxidc_auth::storage` over
//! `tokio::sync::RwLock`-guarded maps. Intended for development and
//! tests; nothing survives a restart. Each store holds its lock for the
//! duration of one operation, which makes the check-then-act contract
//! points (duplicate client ids, cold-start key generation) atomic here
//! without the conditional writes a real backend would need.

mod clients;
mod codes;
mod consents;
mod keys;
mod sessions;
mod users;

pub use clients::MemoryClientStore;
pub use codes::MemoryCodeStore;
pub use consents::MemoryConsentStore;
pub use keys::MemoryKeyStore;
pub use sessions::MemorySessionStore;
pub use users::MemoryUserStore;

use std::sync::Arc;

/// The full set of stores, ready to wire into handler state.
#[derive(Clone, Default)]
pub struct MemoryStores {
    pub clients: Arc<MemoryClientStore>,
    pub codes: Arc<MemoryCodeStore>,
    pub consents: Arc<MemoryConsentStore>,
    pub keys: Arc<MemoryKeyStore>,
    pub sessions: Arc<MemorySessionStore>,
    pub users: Arc<MemoryUserStore>,
}

impl MemoryStores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
