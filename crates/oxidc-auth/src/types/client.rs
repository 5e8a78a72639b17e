//! Registered relying-party client.

use serde::{Deserialize, Serialize};

/// How the entries of [`Client::allowed_redirect_uris`] are interpreted
/// when admitting a candidate redirect URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RedirectUriMode {
    /// Each entry is a literal string prefix of the candidate. Recommended.
    #[default]
    Prefix,
    /// Each entry is a regular expression searched against the candidate.
    /// Entries carry their own anchors (e.g. a trailing `$`).
    Regex,
}

/// A registered relying party.
///
/// Clients are immutable except via an explicit save through the
/// [`ClientStore`](crate::storage::ClientStore); uniqueness of `client_id`
/// is enforced at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Opaque, caller-assigned client identifier.
    pub client_id: String,

    /// Human-readable name shown on the consent screen.
    #[serde(default)]
    pub display_name: String,

    /// Scopes the client may request. Empty means unrestricted.
    #[serde(default)]
    pub allowed_scopes: Vec<String>,

    /// Interpretation of `allowed_redirect_uris`.
    #[serde(default)]
    pub redirect_uri_mode: RedirectUriMode,

    /// Ordered allow-list of redirect URI entries, interpreted per mode.
    #[serde(default)]
    pub allowed_redirect_uris: Vec<String>,
}

impl Client {
    /// Creates a client with prefix-mode redirect matching and no scope
    /// restrictions.
    #[must_use]
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            display_name: String::new(),
            allowed_scopes: Vec::new(),
            redirect_uri_mode: RedirectUriMode::Prefix,
            allowed_redirect_uris: Vec::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Sets the redirect allow-list and its interpretation mode.
    #[must_use]
    pub fn with_redirect_uris(mut self, mode: RedirectUriMode, uris: Vec<String>) -> Self {
        self.redirect_uri_mode = mode;
        self.allowed_redirect_uris = uris;
        self
    }
}
