//! Port for session tokens.

use async_trait::async_trait;

use crate::domain::UserToken;

use super::StoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserTokenRepository: Send + Sync {
    /// Insert a token, filling in its identifier.
    async fn create(&self, token: &mut UserToken) -> Result<(), StoreError>;

    async fn get_by_token(&self, token: &str) -> Result<UserToken, StoreError>;

    /// All tokens belonging to `user_id`, ordered by identifier. Empty when none.
    async fn get_by_user_id(&self, user_id: i64) -> Result<Vec<UserToken>, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Remove every token owned by `user_id`. Succeeds when there are none.
    async fn delete_by_user_id(&self, user_id: i64) -> Result<(), StoreError>;
}
