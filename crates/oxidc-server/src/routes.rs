//! Router assembly.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use oxidc_auth::http::{
    OidcState, accept, authorize, confirm, discovery, jwks, login, login_form, logout, register,
    token,
};

/// Builds the full HTTP surface over `state`.
pub fn build_router(state: OidcState) -> Router {
    Router::new()
        .route("/authorize", get(authorize))
        .route("/accept", get(accept).post(accept))
        .route("/confirm", post(confirm))
        .route("/login", get(login_form).post(login))
        .route("/register", get(login_form).post(register))
        .route("/logout", post(logout))
        .route("/token", post(token))
        .route("/.well-known/jwks.json", get(jwks))
        .route("/.well-known/openid-configuration", get(discovery))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
