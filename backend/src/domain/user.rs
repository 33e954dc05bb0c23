//! User account record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Password;

/// Registered account.
///
/// `updated_at` doubles as the optimistic-lock token: updates only apply
/// when it still matches the stored row, so callers must carry forward the
/// value returned by the most recent read or write.
///
/// The password hash is never serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Database identifier, zero until inserted.
    pub id: i64,
    /// Unique handle.
    pub username: String,
    /// Unique email address.
    pub email: String,
    #[serde(skip)]
    pub password: Password,
    /// Whether the account accepted its invitation.
    pub verified: bool,
    /// Last modification time; optimistic-lock token.
    pub updated_at: DateTime<Utc>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build an unsaved user. Identifier and timestamps are filled by the
    /// store on creation.
    ///
    /// # Examples
    /// ```
    /// use grace::domain::{Password, User};
    ///
    /// let user = User::new("ada", "ada@example.com", Password::default());
    /// assert_eq!(user.id, 0);
    /// assert!(!user.verified);
    /// ```
    pub fn new(username: impl Into<String>, email: impl Into<String>, password: Password) -> Self {
        Self {
            id: 0,
            username: username.into(),
            email: email.into(),
            password,
            verified: false,
            updated_at: DateTime::default(),
            created_at: DateTime::default(),
        }
    }
}
