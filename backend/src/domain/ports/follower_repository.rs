//! Port for the follow graph.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Follower, User};

use super::StoreError;

/// Persistence port for [`Follower`] edges.
///
/// Every method takes the followed user first and the follower second,
/// matching the field order of [`Follower`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowerRepository: Send + Sync {
    async fn create(&self, follower: &Follower) -> Result<(), StoreError>;

    async fn get_by_id(&self, user_id: i64, follower_id: i64) -> Result<Follower, StoreError>;

    /// One page of the users following `user_id`, ordered by username.
    async fn get_followers(&self, user_id: i64, page: PageRequest)
    -> Result<Vec<User>, StoreError>;

    /// One page of the users `follower_id` follows, ordered by username.
    async fn get_following(
        &self,
        follower_id: i64,
        page: PageRequest,
    ) -> Result<Vec<User>, StoreError>;

    async fn delete(&self, user_id: i64, follower_id: i64) -> Result<(), StoreError>;

    async fn is_following(&self, user_id: i64, follower_id: i64) -> Result<bool, StoreError>;

    /// Same as [`FollowerRepository::delete`].
    async fn unfollow(&self, user_id: i64, follower_id: i64) -> Result<(), StoreError>;
}
