//! The authorization code flow: request admission, consent, code
//! issuance and token exchange.

mod authorize;
mod consent;
mod exchange;
mod redirect;

pub use authorize::begin_authorization;
pub use consent::{ConsentView, confirm_consent, consent_view};
pub use exchange::{TokenRequest, TokenResponse, exchange_code};
pub use redirect::is_valid_redirect_uri;
