//! Core data model: clients, users, sessions, grants and codes.

mod client;
mod code;
mod consent;
mod session;
mod user;

pub use client::{Client, RedirectUriMode};
pub use code::AuthorizationCode;
pub use consent::ClientAuthorization;
pub use session::Session;
pub use user::OidcUser;
