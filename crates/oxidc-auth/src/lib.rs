//! Authorization core for an OpenID Connect provider.
//!
//! Implements the authorization code flow: request admission with
//! redirect-URI policy, cookie-carried pending state across the consent
//! round trip, code issuance and single-use redemption, RS512 token
//! signing with rotating keys, and versioned password hashing.
//!
//! Persistence is pluggable through the traits in [`storage`]; page
//! rendering through [`http::PageRenderer`]. The crate ships axum
//! handlers but no router, so hosts decide the surface they expose.

pub mod config;
pub mod error;
pub mod http;
pub mod keys;
pub mod oauth;
pub mod params;
pub mod password;
pub mod storage;
pub mod token;
pub mod types;
pub mod users;

pub use config::AuthConfig;
pub use error::AuthError;

/// Convenience alias used throughout the crate.
pub type AuthResult<T> = Result<T, AuthError>;
