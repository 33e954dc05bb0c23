//! Session tokens and invitation token digests.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Opaque token bound to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserToken {
    pub id: i64,
    pub token: String,
    pub user_id: i64,
}

impl UserToken {
    /// Build an unsaved token.
    pub fn new(token: impl Into<String>, user_id: i64) -> Self {
        Self {
            id: 0,
            token: token.into(),
            user_id,
        }
    }
}

/// Hex SHA-256 digest stored in place of a plain invitation token.
///
/// Only the digest reaches the database; the plain token travels to the
/// invitee out of band.
///
/// # Examples
/// ```
/// use grace::domain::invitation_digest;
///
/// let digest = invitation_digest("welcome");
/// assert_eq!(digest.len(), 64);
/// assert_eq!(digest, invitation_digest("welcome"));
/// ```
#[must_use]
pub fn invitation_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
