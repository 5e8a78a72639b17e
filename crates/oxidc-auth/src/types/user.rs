//! End-user account record.

use serde::{Deserialize, Serialize};

/// A registered end user.
///
/// The `id` doubles as the login username and the `sub` claim of issued
/// tokens. The salt carries its hash-scheme tag (see
/// [`password`](crate::password)), which is what makes credential hashing
/// versionable: old records keep verifying under the scheme they were
/// created with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OidcUser {
    /// Login username and token subject identifier.
    pub id: String,

    /// Scheme-tagged salt, e.g. `"bcrypt:h3Xk..."`.
    pub salt: String,

    /// Password digest produced by the salt's scheme.
    pub encoded_password: String,
}
