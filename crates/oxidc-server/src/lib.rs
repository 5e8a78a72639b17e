//! OpenID-Connect-style identity provider over in-memory storage.
//!
//! Wires the `oxidc-auth` core to the `oxidc-store-memory` backend, the
//! built-in page renderer and an axum router. The binary in `main.rs`
//! adds configuration loading and tracing on top.

pub mod bootstrap;
pub mod config;
pub mod observability;
pub mod pages;
pub mod routes;

use std::sync::Arc;

use oxidc_auth::http::OidcState;
use oxidc_store_memory::MemoryStores;

use crate::config::AppConfig;
use crate::pages::StaticPages;

/// Builds handler state over fresh in-memory stores.
#[must_use]
pub fn build_state(config: &AppConfig) -> OidcState {
    let stores = MemoryStores::new();
    OidcState::new(
        config.auth.clone(),
        stores.clients,
        stores.codes,
        stores.consents,
        stores.sessions,
        stores.users,
        stores.keys,
        Arc::new(StaticPages),
    )
}

/// Builds the complete application: state, seed data, router.
pub async fn build_app(config: &AppConfig) -> anyhow::Result<axum::Router> {
    let state = build_state(config);
    bootstrap::apply(&state, &config.bootstrap).await?;
    Ok(routes::build_router(state))
}
