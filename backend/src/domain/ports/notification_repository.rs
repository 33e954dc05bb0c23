//! Port for card notifications.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::Notification;

use super::StoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert a notification, filling in `created_at`.
    async fn create(&self, notification: &mut Notification) -> Result<(), StoreError>;

    async fn get_by_id(&self, card_id: i64, user_id: i64) -> Result<Notification, StoreError>;

    /// One page of a user's notifications, newest first.
    async fn get_by_user_id(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Vec<Notification>, StoreError>;

    /// Persist the `read` flag.
    async fn update(&self, notification: &Notification) -> Result<(), StoreError>;

    async fn delete(&self, card_id: i64, user_id: i64) -> Result<(), StoreError>;

    /// One page of a user's unread notifications, newest first.
    async fn get_unread_by_user_id(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Vec<Notification>, StoreError>;

    /// Set `read`; already-read notifications stay read. Reports
    /// [`StoreError::NotFound`] when no such notification exists.
    async fn mark_as_read(&self, card_id: i64, user_id: i64) -> Result<(), StoreError>;
}
