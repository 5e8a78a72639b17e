//! Rendering seam for the interactive pages.

use crate::oauth::ConsentView;
use crate::params::PendingAuthorizationState;
use crate::types::Client;

/// Everything the consent page needs to render.
#[derive(Debug, Clone)]
pub struct ConsentPageContext {
    /// The authenticated user.
    pub user_id: String,
    /// The client asking for access.
    pub client: Client,
    /// The merged pending request (scopes shown to the user).
    pub pending: PendingAuthorizationState,
    /// Existing grants, for "already authorized" messaging.
    pub view: ConsentView,
}

/// Renders the interactive HTML pages.
///
/// Implementations own their template engine and caching; handlers only
/// ask for finished HTML.
pub trait PageRenderer: Send + Sync {
    /// The consent screen for an authenticated user.
    fn consent_page(&self, context: &ConsentPageContext) -> String;

    /// The combined login/registration screen. `error` carries a message
    /// from a failed previous attempt.
    fn login_page(&self, error: Option<&str>) -> String;
}
