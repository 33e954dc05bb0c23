//! Aggregate of every repository port.

use std::sync::Arc;

use super::ports::{
    BadgeRepository, CardRepository, FollowerRepository, FriendRepository,
    NotificationRepository, TemplateRepository, UserBadgeRepository, UserRepository,
    UserTokenRepository,
};

/// One handle per repository, shared by inbound adapters.
///
/// Cloning is cheap: every field is an [`Arc`]. Tests build a `Storage`
/// from mocks; production code gets one from
/// `outbound::persistence::DieselStorage::build`.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub user_tokens: Arc<dyn UserTokenRepository>,
    pub templates: Arc<dyn TemplateRepository>,
    pub cards: Arc<dyn CardRepository>,
    pub friends: Arc<dyn FriendRepository>,
    pub followers: Arc<dyn FollowerRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub badges: Arc<dyn BadgeRepository>,
    pub user_badges: Arc<dyn UserBadgeRepository>,
}
