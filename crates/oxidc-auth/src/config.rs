//! Authorization core configuration.
//!
//! All fields carry serde defaults so a completely empty configuration file
//! yields a working development setup.

use serde::{Deserialize, Serialize};
use time::Duration;

fn default_issuer() -> String {
    "http://localhost:8080".to_string()
}

fn default_key_bits() -> usize {
    2048
}

fn default_key_validity_days() -> i64 {
    30
}

fn default_exchange_token_hours() -> i64 {
    3
}

fn default_login_token_hours() -> i64 {
    9
}

fn default_refresh_token_days() -> i64 {
    7
}

fn default_pending_state_minutes() -> i64 {
    15
}

/// Configuration for the authorization core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Issuer URL embedded in the `iss` claim of every minted token and
    /// published in the discovery document.
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// RSA modulus size for generated signing keys (2048 or 4096).
    #[serde(default = "default_key_bits")]
    pub key_bits: usize,

    /// Validity window of a freshly generated signing key, in days.
    #[serde(default = "default_key_validity_days")]
    pub key_validity_days: i64,

    /// Lifetime of tokens minted at the code-exchange endpoint, in hours.
    #[serde(default = "default_exchange_token_hours")]
    pub exchange_token_hours: i64,

    /// Lifetime of the interactive login session token, in hours.
    #[serde(default = "default_login_token_hours")]
    pub login_token_hours: i64,

    /// Lifetime of refresh tokens past the auth token expiry, in days.
    #[serde(default = "default_refresh_token_days")]
    pub refresh_token_days: i64,

    /// Lifetime of the pending-authorization-state cookie, in minutes.
    #[serde(default = "default_pending_state_minutes")]
    pub pending_state_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            key_bits: default_key_bits(),
            key_validity_days: default_key_validity_days(),
            exchange_token_hours: default_exchange_token_hours(),
            login_token_hours: default_login_token_hours(),
            refresh_token_days: default_refresh_token_days(),
            pending_state_minutes: default_pending_state_minutes(),
        }
    }
}

impl AuthConfig {
    /// Validates the configuration, returning a description of the first
    /// problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.issuer.is_empty() {
            return Err("auth.issuer must not be empty".into());
        }
        if self.key_bits != 2048 && self.key_bits != 4096 {
            return Err("auth.key_bits must be 2048 or 4096".into());
        }
        if self.key_validity_days <= 0 {
            return Err("auth.key_validity_days must be > 0".into());
        }
        if self.exchange_token_hours <= 0 || self.login_token_hours <= 0 {
            return Err("auth token lifetimes must be > 0".into());
        }
        Ok(())
    }

    /// Validity window for freshly generated signing keys.
    #[must_use]
    pub fn key_validity(&self) -> Duration {
        Duration::days(self.key_validity_days)
    }

    /// Lifetime of code-exchange tokens.
    #[must_use]
    pub fn exchange_token_ttl(&self) -> Duration {
        Duration::hours(self.exchange_token_hours)
    }

    /// Lifetime of interactive login session tokens.
    #[must_use]
    pub fn login_token_ttl(&self) -> Duration {
        Duration::hours(self.login_token_hours)
    }

    /// How long past the auth token expiry a refresh token stays valid.
    #[must_use]
    pub fn refresh_token_tail(&self) -> Duration {
        Duration::days(self.refresh_token_days)
    }

    /// Lifetime of the pending-state cookie.
    #[must_use]
    pub fn pending_state_ttl(&self) -> Duration {
        Duration::minutes(self.pending_state_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AuthConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.key_bits, 2048);
        assert_eq!(config.exchange_token_ttl(), Duration::hours(3));
        assert_eq!(config.login_token_ttl(), Duration::hours(9));
        assert_eq!(config.pending_state_ttl(), Duration::minutes(15));
    }

    #[test]
    fn test_rejects_odd_key_size() {
        let config = AuthConfig {
            key_bits: 1024,
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_toml_deserializes() {
        let config: AuthConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.issuer, "http://localhost:8080");
        assert_eq!(config.key_validity_days, 30);
    }
}
