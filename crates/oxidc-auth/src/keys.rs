//! Signing-key lifecycle: generation, selection, JWKS export.
//!
//! Multiple keys may be simultaneously valid so that tokens signed earlier
//! remain verifiable while a newer key signs new tokens. The "current" key
//! for new signatures is the first stored key (in store enumeration order)
//! whose validity window contains the requested instant; when none exists,
//! one is generated and persisted on demand.
//!
//! Cold-start note: concurrent first requests can each generate a key. The
//! extra keys are all valid, so this is tolerated; stores may de-duplicate
//! with a conditional put.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{DecodingKey, EncodingKey};
use rand::rngs::OsRng;
use rsa::RsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey, LineEnding};
use rsa::traits::PublicKeyParts;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::storage::KeyStore;

/// A signing keypair with its validity window.
///
/// The private key travels as PKCS#8 PEM so any store can persist it
/// without understanding the key structure.
#[derive(Clone, Serialize, Deserialize)]
pub struct SigningKey {
    /// Unique key identifier, embedded in token headers.
    pub kid: String,

    /// Key type; `"RSA"` is the only supported value.
    pub kty: String,

    /// PKCS#8 PEM of the private key. Never exported.
    pub private_pem: String,

    /// Start of the validity window.
    pub not_before: OffsetDateTime,

    /// End of the validity window.
    pub expiry: OffsetDateTime,
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("kid", &self.kid)
            .field("kty", &self.kty)
            .field("not_before", &self.not_before)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl SigningKey {
    /// Generates a fresh RSA keypair valid for `validity` starting at
    /// `as_of`.
    pub fn generate(
        as_of: OffsetDateTime,
        bits: usize,
        validity: Duration,
    ) -> Result<Self, AuthError> {
        let private_key =
            RsaPrivateKey::new(&mut OsRng, bits).map_err(|e| AuthError::signing(e.to_string()))?;
        let pem = private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| AuthError::signing(e.to_string()))?;
        Ok(Self {
            kid: Uuid::new_v4().to_string(),
            kty: "RSA".to_string(),
            private_pem: pem.to_string(),
            not_before: as_of,
            expiry: as_of + validity,
        })
    }

    /// Returns `true` if `when` falls inside the validity window.
    #[must_use]
    pub fn in_window(&self, when: OffsetDateTime) -> bool {
        when >= self.not_before && when <= self.expiry
    }

    fn private_key(&self) -> Result<RsaPrivateKey, AuthError> {
        RsaPrivateKey::from_pkcs8_pem(&self.private_pem)
            .map_err(|e| AuthError::signing(e.to_string()))
    }

    /// The encoding key for signing.
    pub fn encoding_key(&self) -> Result<EncodingKey, AuthError> {
        EncodingKey::from_rsa_pem(self.private_pem.as_bytes())
            .map_err(|e| AuthError::signing(e.to_string()))
    }

    /// The decoding key for verification, derived from the public parts.
    pub fn decoding_key(&self) -> Result<DecodingKey, AuthError> {
        let (n, e) = self.public_components()?;
        DecodingKey::from_rsa_components(&n, &e).map_err(|e| AuthError::signing(e.to_string()))
    }

    /// Base64url (unpadded) modulus and exponent of the public key.
    fn public_components(&self) -> Result<(String, String), AuthError> {
        let public = self.private_key()?.to_public_key();
        let n = URL_SAFE_NO_PAD.encode(public.n().to_bytes_be());
        let e = URL_SAFE_NO_PAD.encode(public.e().to_bytes_be());
        Ok((n, e))
    }

    /// Exports the public half as a JWK. Private material never leaves.
    pub fn to_jwk(&self) -> Result<Jwk, AuthError> {
        let (n, e) = self.public_components()?;
        Ok(Jwk {
            kty: self.kty.clone(),
            kid: self.kid.clone(),
            use_: "sig".to_string(),
            alg: "RS512".to_string(),
            n,
            e,
        })
    }
}

/// A published public key, RSA signature use only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type (`"RSA"`).
    pub kty: String,
    /// Key identifier.
    pub kid: String,
    /// Key use (`"sig"`).
    #[serde(rename = "use")]
    pub use_: String,
    /// Signature algorithm (`"RS512"`).
    pub alg: String,
    /// Modulus, base64url without padding, big-endian unsigned bytes.
    pub n: String,
    /// Public exponent, same encoding.
    pub e: String,
}

/// JSON Web Key Set document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwks {
    /// The published keys.
    pub keys: Vec<Jwk>,
}

/// Selects, generates and publishes signing keys on top of a [`KeyStore`].
#[derive(Clone)]
pub struct KeyManager {
    store: Arc<dyn KeyStore>,
    key_bits: usize,
    key_validity: Duration,
}

impl KeyManager {
    /// Creates a manager over `store` using the configured key strength and
    /// validity window.
    #[must_use]
    pub fn new(store: Arc<dyn KeyStore>, config: &AuthConfig) -> Self {
        Self {
            store,
            key_bits: config.key_bits,
            key_validity: config.key_validity(),
        }
    }

    /// Returns the key to sign with at `as_of`.
    ///
    /// The first stored key whose window contains `as_of` wins; if none
    /// does, a fresh key is generated, persisted and returned.
    pub async fn current_key(&self, as_of: OffsetDateTime) -> Result<SigningKey, AuthError> {
        for kid in self.store.list_kids().await? {
            if let Some(key) = self.store.get(&kid).await? {
                if key.in_window(as_of) {
                    return Ok(key);
                }
            }
        }

        let key = SigningKey::generate(as_of, self.key_bits, self.key_validity)?;
        tracing::info!(kid = %key.kid, "generated new signing key");
        self.store.save(&key).await?;
        Ok(key)
    }

    /// Fetches a key by id. Pass-through to the store.
    pub async fn get(&self, kid: &str) -> Result<Option<SigningKey>, AuthError> {
        self.store.get(kid).await
    }

    /// Builds the JWKS document over every stored key.
    ///
    /// A key whose material fails to parse is skipped with a warning rather
    /// than poisoning the whole document.
    pub async fn jwks(&self) -> Result<Jwks, AuthError> {
        let mut keys = Vec::new();
        for kid in self.store.list_kids().await? {
            let Some(key) = self.store.get(&kid).await? else {
                continue;
            };
            match key.to_jwk() {
                Ok(jwk) => keys.push(jwk),
                Err(e) => tracing::warn!(kid = %kid, error = %e, "skipping unexportable key"),
            }
        }
        Ok(Jwks { keys })
    }
}
