//! Port for user accounts and their invitations.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::User;

use super::StoreError;

/// Persistence port for [`User`] records.
///
/// Mutating calls take `&mut User` and write the store-assigned fields
/// (`id`, timestamps, `verified`) back into the caller's value only when
/// the call succeeds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] or
    /// [`StoreError::DuplicateUsername`] when a unique key is taken.
    async fn create(&self, user: &mut User) -> Result<(), StoreError>;

    /// Insert a user and an invitation for it in one transaction.
    ///
    /// `token` is the plain invitation token; only its digest is stored. The
    /// invitation expires `expiry` after creation. If either insert fails
    /// neither row survives and `user` is left untouched.
    async fn create_and_invite(
        &self,
        user: &mut User,
        token: &str,
        expiry: Duration,
    ) -> Result<(), StoreError>;

    /// Redeem an unexpired invitation, marking its user verified.
    ///
    /// Unknown or expired tokens report [`StoreError::NotFound`]. The
    /// invitation is consumed on success.
    async fn activate(&self, token: &str) -> Result<User, StoreError>;

    /// Fetch a user by identifier.
    async fn get_by_id(&self, id: i64) -> Result<User, StoreError>;

    /// Update username and email, guarded by `updated_at`.
    ///
    /// Reports [`StoreError::NotFound`] when the row is gone or was modified
    /// since `user.updated_at` was read.
    async fn update(&self, user: &mut User) -> Result<(), StoreError>;

    /// Delete a user.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
