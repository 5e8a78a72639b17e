//! Startup seed data.

use oxidc_auth::AuthError;
use oxidc_auth::http::OidcState;
use oxidc_auth::types::{Client, RedirectUriMode};

use crate::config::BootstrapConfig;

/// Registers the configured client and user if they are not present.
///
/// Re-running against a populated store is a no-op: an existing client or
/// user is left untouched.
pub async fn apply(state: &OidcState, bootstrap: &BootstrapConfig) -> anyhow::Result<()> {
    if let Some(seed) = &bootstrap.client {
        if state.clients.get(&seed.client_id).await?.is_none() {
            let client = Client::new(&seed.client_id)
                .with_display_name(&seed.display_name)
                .with_redirect_uris(RedirectUriMode::Prefix, seed.redirect_uri_prefixes.clone());
            state.clients.save(&client).await?;
            tracing::info!(client_id = %seed.client_id, "bootstrapped client");
        }
    }

    if let Some(seed) = &bootstrap.user {
        match state.users.register(&seed.username, &seed.password).await {
            Ok(_) => tracing::info!(user_id = %seed.username, "bootstrapped user"),
            Err(AuthError::UserExists { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
