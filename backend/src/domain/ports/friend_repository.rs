//! Port for the directed friend graph.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Friend, User};

use super::StoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendRepository: Send + Sync {
    async fn create(&self, friend: &Friend) -> Result<(), StoreError>;

    /// Fetch the `user_id -> friend_id` edge.
    async fn get_by_id(&self, user_id: i64, friend_id: i64) -> Result<Friend, StoreError>;

    /// One page of the users befriended by `user_id`, ordered by username.
    async fn get_by_user_id(&self, user_id: i64, page: PageRequest)
    -> Result<Vec<User>, StoreError>;

    async fn delete(&self, user_id: i64, friend_id: i64) -> Result<(), StoreError>;

    /// Whether the `user_id -> friend_id` edge exists.
    async fn is_friend(&self, user_id: i64, friend_id: i64) -> Result<bool, StoreError>;
}
