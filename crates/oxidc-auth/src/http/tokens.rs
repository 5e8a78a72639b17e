//! Token endpoint, JWKS and discovery handlers.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::AuthError;
use crate::oauth::{TokenRequest, exchange_code};

use super::state::OidcState;

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("json"))
}

/// `POST /token`: redeem an authorization code.
///
/// The body is JSON or form-encoded depending on the content type;
/// relying-party libraries are split on which they send.
pub async fn token(
    State(state): State<OidcState>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, AuthError> {
    let request: TokenRequest = if is_json(&headers) {
        match serde_json::from_str(&body) {
            Ok(request) => request,
            Err(_) => {
                return Ok((StatusCode::BAD_REQUEST, "malformed token request").into_response());
            }
        }
    } else {
        match serde_urlencoded::from_str(&body) {
            Ok(request) => request,
            Err(_) => {
                return Ok((StatusCode::BAD_REQUEST, "malformed token request").into_response());
            }
        }
    };

    let response = exchange_code(
        state.codes.as_ref(),
        state.sessions.as_ref(),
        &state.keys,
        &state.config,
        &request,
    )
    .await?;
    Ok(Json(response).into_response())
}

/// `GET /.well-known/jwks.json`: the published verification keys.
pub async fn jwks(State(state): State<OidcState>) -> Result<Response, AuthError> {
    let document = state.keys.jwks().await?;
    Ok((
        [(header::CACHE_CONTROL, "public, max-age=3600")],
        Json(document),
    )
        .into_response())
}

#[derive(Debug, Serialize)]
struct DiscoveryDocument {
    issuer: String,
    authorization_endpoint: String,
    token_endpoint: String,
    jwks_uri: String,
}

/// `GET /.well-known/openid-configuration`: minimal provider metadata.
pub async fn discovery(State(state): State<OidcState>) -> Json<impl Serialize> {
    let base = state.config.issuer.trim_end_matches('/');
    Json(DiscoveryDocument {
        issuer: state.config.issuer.clone(),
        authorization_endpoint: format!("{base}/authorize"),
        token_endpoint: format!("{base}/token"),
        jwks_uri: format!("{base}/.well-known/jwks.json"),
    })
}
