//! Authorization, consent entry and confirmation handlers.

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AuthError;
use crate::oauth::{begin_authorization, confirm_consent, consent_view};
use crate::params::PendingAuthorizationState;

use super::cookies::{PENDING_COOKIE, pending_cookie, removal_cookie};
use super::pages::ConsentPageContext;
use super::state::OidcState;
use super::{authenticated_claims, found};

fn current_pending(jar: &CookieJar) -> Option<PendingAuthorizationState> {
    let cookie = jar.get(PENDING_COOKIE)?;
    PendingAuthorizationState::from_query(cookie.value()).ok()
}

/// `GET /authorize`: admit the request and bounce to the consent entry.
pub async fn authorize(
    State(state): State<OidcState>,
    RawQuery(query): RawQuery,
) -> Result<Response, AuthError> {
    let pending = PendingAuthorizationState::from_query(query.as_deref().unwrap_or(""))?;
    if !pending.is_valid() {
        return Err(AuthError::invalid_pending_state(
            "missing required authorization parameters",
        ));
    }
    let target = begin_authorization(state.clients.as_ref(), &pending).await?;
    Ok(found(&target))
}

/// `GET|POST /accept`: the consent entry point.
///
/// Arriving with query parameters folds them into the pending-state
/// cookie and redirects back to the clean `/accept` URL, so the cookie
/// stays the single source of truth and the consent URL is stable across
/// login round trips. Arriving clean renders either the login page or
/// the consent page depending on authentication.
pub async fn accept(
    State(state): State<OidcState>,
    jar: CookieJar,
    RawQuery(query): RawQuery,
) -> Result<Response, AuthError> {
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        let incoming = PendingAuthorizationState::from_query(&query)?;
        let mut merged = current_pending(&jar).unwrap_or_default();
        merged.merge(&incoming);
        let jar = jar.add(pending_cookie(
            merged.to_query()?,
            state.config.pending_state_ttl(),
        ));
        return Ok((jar, found("/accept")).into_response());
    }

    let pending = current_pending(&jar).ok_or_else(|| {
        AuthError::invalid_pending_state("no pending authorization request")
    })?;
    if !pending.is_valid() {
        return Err(AuthError::invalid_pending_state(
            "pending authorization request is incomplete",
        ));
    }

    let Some(claims) = authenticated_claims(&state, &jar).await else {
        return Ok(Html(state.pages.login_page(None)).into_response());
    };

    let client = state
        .clients
        .get(&pending.client_id)
        .await?
        .ok_or_else(|| AuthError::client_not_found(&pending.client_id))?;
    let view = consent_view(state.consents.as_ref(), &claims.sub, &pending.client_id).await?;
    let context = ConsentPageContext {
        user_id: claims.sub,
        client,
        pending,
        view,
    };
    Ok(Html(state.pages.consent_page(&context)).into_response())
}

/// `POST /confirm`: record consent and deliver the authorization code.
pub async fn confirm(
    State(state): State<OidcState>,
    jar: CookieJar,
) -> Result<Response, AuthError> {
    let pending = current_pending(&jar).ok_or_else(|| {
        AuthError::invalid_pending_state("no pending authorization request")
    })?;

    let Some(claims) = authenticated_claims(&state, &jar).await else {
        return Ok((StatusCode::BAD_REQUEST, "authentication required").into_response());
    };

    let target = confirm_consent(
        state.consents.as_ref(),
        state.codes.as_ref(),
        &state.config,
        &claims.sub,
        &pending,
    )
    .await?;

    // the request is fulfilled, the pending cookie has served its purpose
    let jar = jar.remove(removal_cookie(PENDING_COOKIE));
    Ok((jar, found(&target)).into_response())
}
