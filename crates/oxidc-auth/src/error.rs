//! Error types for the authorization core.
//!
//! Verification failures on session cookies are deliberately *not* part of
//! this taxonomy: an unverifiable session token degrades to "unauthenticated"
//! and the caller falls through to the login flow instead of erroring.

use axum::http::StatusCode;

/// Errors that can occur during the authorization code flow and its
/// supporting services.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The requested client id is not registered.
    #[error("client not found: {client_id}")]
    ClientNotFound {
        /// The client id that was looked up.
        client_id: String,
    },

    /// The candidate redirect URI is not admitted by the client's policy.
    #[error("invalid redirect uri: {uri}")]
    InvalidRedirectUri {
        /// The rejected redirect URI.
        uri: String,
    },

    /// The cookie-carried pending authorization state is malformed or
    /// incomplete and cannot be recovered.
    #[error("invalid pending authorization state: {message}")]
    InvalidPendingState {
        /// Description of what made the state unusable.
        message: String,
    },

    /// The presented authorization code is unknown, already redeemed, or
    /// expired.
    #[error("invalid authorization code")]
    InvalidAuthorizationCode,

    /// Registration was attempted for a user id that is already taken.
    #[error("user already exists: {user_id}")]
    UserExists {
        /// The contested user id.
        user_id: String,
    },

    /// Key generation or JWT signing failed.
    #[error("signing failure: {message}")]
    Signing {
        /// Description of the signing failure.
        message: String,
    },

    /// A persistence store operation failed. The underlying cause is kept
    /// for logging and surfaced to callers as an opaque server error.
    #[error("storage failure: {message}")]
    Storage {
        /// Description of the storage failure.
        message: String,
    },

    /// The requested feature is not implemented.
    #[error("unsupported: {feature}")]
    Unsupported {
        /// Name of the unsupported feature.
        feature: String,
    },
}

impl AuthError {
    /// Creates a new `ClientNotFound` error.
    #[must_use]
    pub fn client_not_found(client_id: impl Into<String>) -> Self {
        Self::ClientNotFound {
            client_id: client_id.into(),
        }
    }

    /// Creates a new `InvalidRedirectUri` error.
    #[must_use]
    pub fn invalid_redirect_uri(uri: impl Into<String>) -> Self {
        Self::InvalidRedirectUri { uri: uri.into() }
    }

    /// Creates a new `InvalidPendingState` error.
    #[must_use]
    pub fn invalid_pending_state(message: impl Into<String>) -> Self {
        Self::InvalidPendingState {
            message: message.into(),
        }
    }

    /// Creates a new `UserExists` error.
    #[must_use]
    pub fn user_exists(user_id: impl Into<String>) -> Self {
        Self::UserExists {
            user_id: user_id.into(),
        }
    }

    /// Creates a new `Signing` error.
    #[must_use]
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Unsupported` error.
    #[must_use]
    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::Unsupported {
            feature: feature.into(),
        }
    }

    /// Maps the error to the HTTP status it should surface as.
    ///
    /// Client-caused conditions map to `400`, infrastructure failures to
    /// `500`, and unimplemented features to `501`.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ClientNotFound { .. }
            | Self::InvalidRedirectUri { .. }
            | Self::InvalidPendingState { .. }
            | Self::InvalidAuthorizationCode
            | Self::UserExists { .. } => StatusCode::BAD_REQUEST,
            Self::Signing { .. } | Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unsupported { .. } => StatusCode::NOT_IMPLEMENTED,
        }
    }

    /// Returns `true` if the error is an infrastructure failure whose cause
    /// should be logged server-side rather than shown to the caller.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Signing { .. } | Self::Storage { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AuthError::client_not_found("app").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::invalid_redirect_uri("http://x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidAuthorizationCode.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::storage("io").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AuthError::signing("rsa").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AuthError::unsupported("introspection").status_code(),
            StatusCode::NOT_IMPLEMENTED
        );
    }

    #[test]
    fn test_server_error_predicate() {
        assert!(AuthError::storage("down").is_server_error());
        assert!(AuthError::signing("bad key").is_server_error());
        assert!(!AuthError::user_exists("alice").is_server_error());
    }

    #[test]
    fn test_display_includes_context() {
        let err = AuthError::client_not_found("my-app");
        assert_eq!(err.to_string(), "client not found: my-app");
        let err = AuthError::user_exists("alice");
        assert_eq!(err.to_string(), "user already exists: alice");
    }
}
