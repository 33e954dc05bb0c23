//! Ports for badges and badge awards.

use async_trait::async_trait;

use crate::domain::{Badge, UserBadge};

use super::StoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BadgeRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Badge, StoreError>;

    /// Insert a badge, filling in its identifier.
    async fn create(&self, badge: &mut Badge) -> Result<(), StoreError>;

    /// Every badge, ordered by title.
    async fn list_all(&self) -> Result<Vec<Badge>, StoreError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserBadgeRepository: Send + Sync {
    /// Award a badge, filling in `created_at`.
    async fn create(&self, award: &mut UserBadge) -> Result<(), StoreError>;

    async fn get_by_id(&self, user_id: i64, badge_id: i64) -> Result<UserBadge, StoreError>;

    /// Badges awarded to `user_id`, ordered by title.
    async fn get_by_user_id(&self, user_id: i64) -> Result<Vec<Badge>, StoreError>;

    async fn delete(&self, user_id: i64, badge_id: i64) -> Result<(), StoreError>;
}
