//! Versioned password hashing.
//!
//! The scheme a password was hashed under travels inside the salt as a
//! `"{scheme}:{random}"` prefix, so existing credentials keep verifying
//! after the default scheme changes. New salts always use the current
//! default (bcrypt); md5 and sha512 exist for migrated records, and
//! `none` stores the salted input verbatim for development seed data.

use bcrypt::DEFAULT_COST;
use md5::Md5;
use rand::Rng;
use rand::distributions::Alphanumeric;
use sha2::{Digest, Sha512};

use crate::error::AuthError;

const SALT_RANDOM_LEN: usize = 16;

/// A supported password hashing scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    /// No hashing. Development seed data only.
    None,
    Md5,
    Sha512,
    Bcrypt,
}

impl HashScheme {
    /// The scheme used for newly created credentials.
    pub const DEFAULT: Self = Self::Bcrypt;

    /// The tag stored in the salt prefix.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Md5 => "md5",
            Self::Sha512 => "sha512",
            Self::Bcrypt => "bcrypt",
        }
    }

    /// Parses a salt-prefix tag.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "none" => Some(Self::None),
            "md5" => Some(Self::Md5),
            "sha512" => Some(Self::Sha512),
            "bcrypt" => Some(Self::Bcrypt),
            _ => None,
        }
    }
}

/// Generates a fresh salt for `scheme`: the scheme tag, a colon, and
/// sixteen random alphanumeric characters.
#[must_use]
pub fn generate_salt(scheme: HashScheme) -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_RANDOM_LEN)
        .map(char::from)
        .collect();
    format!("{}:{}", scheme.tag(), random)
}

fn scheme_of(salt: &str) -> Result<HashScheme, AuthError> {
    let tag = salt.split(':').next().unwrap_or("");
    HashScheme::parse(tag)
        .ok_or_else(|| AuthError::unsupported(format!("password hash scheme {tag:?}")))
}

/// Encodes `password` under the scheme named by `salt`.
///
/// Every scheme operates on the salt-prefixed password; bcrypt carries
/// its own internal salt on top, so its output differs between calls.
pub fn encode_password(salt: &str, password: &str) -> Result<String, AuthError> {
    let salted = format!("{salt}{password}");
    match scheme_of(salt)? {
        HashScheme::None => Ok(salted),
        HashScheme::Md5 => Ok(hex::encode(Md5::digest(salted.as_bytes()))),
        HashScheme::Sha512 => Ok(hex::encode(Sha512::digest(salted.as_bytes()))),
        HashScheme::Bcrypt => {
            bcrypt::hash(&salted, DEFAULT_COST).map_err(|e| AuthError::signing(e.to_string()))
        }
    }
}

/// Checks `password` against a stored `encoded` value.
///
/// Any internal failure (unknown scheme, corrupt bcrypt string) reads as
/// a mismatch rather than an error.
#[must_use]
pub fn compare_password(salt: &str, password: &str, encoded: &str) -> bool {
    let Ok(scheme) = scheme_of(salt) else {
        return false;
    };
    match scheme {
        HashScheme::Bcrypt => {
            let salted = format!("{salt}{password}");
            bcrypt::verify(&salted, encoded).unwrap_or(false)
        }
        _ => encode_password(salt, password).map(|e| e == encoded).unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salt_shape() {
        let salt = generate_salt(HashScheme::Bcrypt);
        let (tag, random) = salt.split_once(':').unwrap();
        assert_eq!(tag, "bcrypt");
        assert_eq!(random.len(), SALT_RANDOM_LEN);
        assert!(random.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_salts_are_unique() {
        assert_ne!(generate_salt(HashScheme::Md5), generate_salt(HashScheme::Md5));
    }

    #[test]
    fn test_round_trip_every_scheme() {
        for scheme in [
            HashScheme::None,
            HashScheme::Md5,
            HashScheme::Sha512,
            HashScheme::Bcrypt,
        ] {
            let salt = generate_salt(scheme);
            let encoded = encode_password(&salt, "hunter2").unwrap();
            assert!(compare_password(&salt, "hunter2", &encoded), "{scheme:?}");
            assert!(!compare_password(&salt, "wrong", &encoded), "{scheme:?}");
        }
    }

    #[test]
    fn test_same_password_different_salts_differ() {
        let a = generate_salt(HashScheme::Sha512);
        let b = generate_salt(HashScheme::Sha512);
        assert_ne!(
            encode_password(&a, "hunter2").unwrap(),
            encode_password(&b, "hunter2").unwrap()
        );
    }

    #[test]
    fn test_swapped_arguments_do_not_verify() {
        let salt = generate_salt(HashScheme::Sha512);
        let encoded = encode_password(&salt, "hunter2").unwrap();
        assert!(!compare_password("hunter2", &salt, &encoded));
    }

    #[test]
    fn test_none_scheme_stores_salted_input() {
        let salt = generate_salt(HashScheme::None);
        let encoded = encode_password(&salt, "hunter2").unwrap();
        assert_eq!(encoded, format!("{salt}hunter2"));
        assert!(compare_password(&salt, "hunter2", &encoded));
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        assert!(encode_password("argon2:abcdefgh", "pw").is_err());
        assert!(!compare_password("argon2:abcdefgh", "pw", "anything"));
    }

    #[test]
    fn test_bcrypt_output_carries_internal_salt() {
        let salt = generate_salt(HashScheme::Bcrypt);
        let a = encode_password(&salt, "hunter2").unwrap();
        let b = encode_password(&salt, "hunter2").unwrap();
        assert_ne!(a, b);
        assert!(compare_password(&salt, "hunter2", &a));
        assert!(compare_password(&salt, "hunter2", &b));
    }
}
