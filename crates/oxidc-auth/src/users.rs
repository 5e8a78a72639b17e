//! User registration and credential checks.

use std::sync::Arc;

use crate::error::AuthError;
use crate::password::{self, HashScheme};
use crate::storage::UserStore;
use crate::types::OidcUser;

/// Registration and login on top of a [`UserStore`].
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Creates a user with a fresh salt under the default hash scheme.
    ///
    /// Fails with [`AuthError::UserExists`] when the id is taken.
    pub async fn register(&self, user_id: &str, password: &str) -> Result<OidcUser, AuthError> {
        if self.users.get(user_id).await?.is_some() {
            return Err(AuthError::user_exists(user_id));
        }
        let salt = password::generate_salt(HashScheme::DEFAULT);
        let encoded_password = password::encode_password(&salt, password)?;
        let user = OidcUser {
            id: user_id.to_string(),
            salt,
            encoded_password,
        };
        self.users.save(&user).await?;
        tracing::info!(user_id = %user.id, "registered user");
        Ok(user)
    }

    /// Checks credentials. An unknown user and a wrong password both read
    /// as `None`; callers cannot tell the two apart.
    pub async fn login(&self, user_id: &str, password: &str) -> Result<Option<OidcUser>, AuthError> {
        let Some(user) = self.users.get(user_id).await? else {
            return Ok(None);
        };
        if password::compare_password(&user.salt, password, &user.encoded_password) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}
