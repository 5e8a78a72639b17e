//! Axum handlers for the OIDC surface.
//!
//! Handlers are thin: they parse cookies and bodies, call into the flow
//! functions in [`crate::oauth`], and translate [`AuthError`] into HTTP
//! responses. Page rendering is delegated through the [`PageRenderer`]
//! seam so the handlers stay template-engine agnostic.

mod account;
mod cookies;
mod flow;
mod pages;
mod state;
mod tokens;

pub use account::{LoginForm, login, login_form, logout, register};
pub use cookies::{
    PENDING_COOKIE, REFRESH_COOKIE, SESSION_COOKIE, pending_cookie, refresh_cookie, removal_cookie,
    session_cookie,
};
pub use flow::{accept, authorize, confirm};
pub use pages::{ConsentPageContext, PageRenderer};
pub use state::OidcState;
pub use tokens::{discovery, jwks, token};

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use time::OffsetDateTime;

use crate::error::AuthError;
use crate::token::{self, RefreshTokenClaims, SessionTokenClaims};
use crate::types::Session;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(error = %self, "request failed");
            // the cause stays in the log; callers get an opaque 500
            (self.status_code(), "internal error").into_response()
        } else {
            (self.status_code(), self.to_string()).into_response()
        }
    }
}

/// A `302 Found` redirect.
///
/// [`axum::response::Redirect::to`] emits `303 See Other`, which browsers
/// handle the same way but relying-party test suites do not expect.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Resolves the authenticated user from the session cookie.
///
/// Returns `None` for a missing, malformed, expired or foreign-keyed
/// token, and for tokens whose session no longer exists server-side.
/// None of these are errors; the caller falls back to the login screen.
pub(crate) async fn authenticated_claims(
    state: &OidcState,
    jar: &CookieJar,
) -> Option<SessionTokenClaims> {
    let jwt = jar.get(SESSION_COOKIE)?.value().to_string();
    let kid = token::peek_kid(&jwt)?;
    let key = state.keys.get(&kid).await.ok().flatten()?;
    let claims: SessionTokenClaims = token::verify(&key, &jwt)?;
    state
        .sessions
        .load(&claims.sid, &claims.sub)
        .await
        .ok()
        .flatten()?;
    Some(claims)
}

/// Establishes a fresh login session for `user_id` and returns the jar
/// with both session and refresh cookies set.
pub(crate) async fn establish_session(
    state: &OidcState,
    jar: CookieJar,
    user_id: &str,
) -> Result<CookieJar, AuthError> {
    let now = OffsetDateTime::now_utc();
    let session = Session::new(user_id);
    state.sessions.save(&session).await?;

    let key = state.keys.current_key(now).await?;
    let issuer = &state.config.issuer;
    let ttl = state.config.login_token_ttl();

    // interactive sessions are self-issued; the audience is the issuer
    let claims = SessionTokenClaims::for_session(issuer, issuer, &session, now, ttl);
    let session_jwt = token::sign(&key, &claims)?;

    let refresh_claims = RefreshTokenClaims::for_session(
        issuer,
        issuer,
        &session,
        now + ttl,
        state.config.refresh_token_tail(),
    );
    let refresh_jwt = token::sign(&key, &refresh_claims)?;

    tracing::info!(user_id = %user_id, sid = %session.session_id, "established session");
    Ok(jar
        .add(session_cookie(session_jwt, ttl))
        .add(refresh_cookie(refresh_jwt, ttl + state.config.refresh_token_tail())))
}
