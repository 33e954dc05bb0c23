//! Port for gratefulness cards.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::Card;

use super::StoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Card, StoreError>;

    /// Insert a card, filling in its identifier and timestamps.
    async fn create(&self, card: &mut Card) -> Result<(), StoreError>;

    /// One page of a user's cards, newest first.
    async fn get_by_user_id(&self, user_id: i64, page: PageRequest)
    -> Result<Vec<Card>, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
