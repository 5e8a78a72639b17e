//! Consent confirmation and code issuance.

use time::OffsetDateTime;
use url::Url;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::params::PendingAuthorizationState;
use crate::storage::{AuthorizationCodeStore, ConsentStore, collect_user_grants};
use crate::types::{AuthorizationCode, ClientAuthorization};

/// What the consent screen shows: the grant for the client currently
/// asking (if any) and the user's other standing grants.
#[derive(Debug, Clone)]
pub struct ConsentView {
    /// Existing grant for the requesting client, `None` on first approach.
    pub current: Option<ClientAuthorization>,
    /// The user's grants to other clients.
    pub others: Vec<ClientAuthorization>,
}

/// Assembles the consent screen data for `user_id` facing `client_id`.
pub async fn consent_view(
    consents: &dyn ConsentStore,
    user_id: &str,
    client_id: &str,
) -> Result<ConsentView, AuthError> {
    let current = consents.get(user_id, client_id).await?;
    let others = collect_user_grants(consents, user_id)
        .await?
        .into_iter()
        .filter(|grant| grant.client_id != client_id)
        .collect();
    Ok(ConsentView { current, others })
}

/// Records consent and mints an authorization code.
///
/// A grant for `(user, client)` is created only if absent, so repeated
/// approvals never duplicate records. Returns the full redirect URL with
/// `code` (and `state`, when the client sent one) appended.
pub async fn confirm_consent(
    consents: &dyn ConsentStore,
    codes: &dyn AuthorizationCodeStore,
    config: &AuthConfig,
    user_id: &str,
    pending: &PendingAuthorizationState,
) -> Result<String, AuthError> {
    if !pending.is_valid() {
        return Err(AuthError::invalid_pending_state(
            "missing required authorization parameters",
        ));
    }

    if consents.get(user_id, &pending.client_id).await?.is_none() {
        consents
            .save(&ClientAuthorization::new(user_id, &pending.client_id))
            .await?;
        tracing::info!(user_id = %user_id, client_id = %pending.client_id, "recorded consent");
    }

    let mut code = AuthorizationCode::new(user_id, pending.to_query()?);
    code.expiry = Some(OffsetDateTime::now_utc() + config.exchange_token_ttl());
    codes.save(&code).await?;

    let mut target = Url::parse(&pending.redirect_uri)
        .map_err(|_| AuthError::invalid_redirect_uri(&pending.redirect_uri))?;
    target.query_pairs_mut().append_pair("code", &code.code);
    if !pending.state.is_empty() {
        target.query_pairs_mut().append_pair("state", &pending.state);
    }
    Ok(target.to_string())
}
