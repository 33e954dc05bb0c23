//! Wires every Diesel repository into a [`Storage`] aggregate.

use std::sync::Arc;

use crate::domain::Storage;

use super::diesel_badge_repository::{DieselBadgeRepository, DieselUserBadgeRepository};
use super::diesel_card_repository::DieselCardRepository;
use super::diesel_follower_repository::DieselFollowerRepository;
use super::diesel_friend_repository::DieselFriendRepository;
use super::diesel_notification_repository::DieselNotificationRepository;
use super::diesel_template_repository::DieselTemplateRepository;
use super::diesel_user_repository::DieselUserRepository;
use super::diesel_user_token_repository::DieselUserTokenRepository;
use super::pool::DbPool;

/// Factory for the Diesel-backed [`Storage`].
pub struct DieselStorage;

impl DieselStorage {
    /// Build a [`Storage`] whose repositories share `pool`.
    pub fn build(pool: DbPool) -> Storage {
        Storage {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            user_tokens: Arc::new(DieselUserTokenRepository::new(pool.clone())),
            templates: Arc::new(DieselTemplateRepository::new(pool.clone())),
            cards: Arc::new(DieselCardRepository::new(pool.clone())),
            friends: Arc::new(DieselFriendRepository::new(pool.clone())),
            followers: Arc::new(DieselFollowerRepository::new(pool.clone())),
            notifications: Arc::new(DieselNotificationRepository::new(pool.clone())),
            badges: Arc::new(DieselBadgeRepository::new(pool.clone())),
            user_badges: Arc::new(DieselUserBadgeRepository::new(pool)),
        }
    }
}
