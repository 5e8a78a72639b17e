//! Persistence contracts consumed by the authorization core.
//!
//! The core only ever talks to these traits; concrete backends (in-memory,
//! document stores, SQL) live in separate crates. Two contract points need
//! atomicity from real backends that the core cannot provide itself:
//!
//! - `ClientStore::save` must reject a duplicate `client_id` with a
//!   conditional write, not a read-then-write.
//! - `KeyStore::save` during cold start can race; a conditional put keeps
//!   duplicate generated keys out, though extra valid keys are harmless.

mod client;
mod code;
mod consent;
mod key;
mod session;
mod user;

pub use client::ClientStore;
pub use code::AuthorizationCodeStore;
pub use consent::{ConsentPage, ConsentStore, collect_user_grants};
pub use key::KeyStore;
pub use session::SessionStore;
pub use user::UserStore;
