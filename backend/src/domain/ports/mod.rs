//! Domain ports: the repository traits store adapters implement.
//!
//! Every port reports failures as [`StoreError`] so callers can tell
//! "nothing there" and unique-key clashes apart from opaque I/O failures.

mod macros;
pub(crate) use macros::define_port_error;

mod badge_repository;
mod card_repository;
mod follower_repository;
mod friend_repository;
mod notification_repository;
mod store_error;
mod template_repository;
mod user_repository;
mod user_token_repository;

#[cfg(test)]
pub use badge_repository::{MockBadgeRepository, MockUserBadgeRepository};
pub use badge_repository::{BadgeRepository, UserBadgeRepository};
#[cfg(test)]
pub use card_repository::MockCardRepository;
pub use card_repository::CardRepository;
#[cfg(test)]
pub use follower_repository::MockFollowerRepository;
pub use follower_repository::FollowerRepository;
#[cfg(test)]
pub use friend_repository::MockFriendRepository;
pub use friend_repository::FriendRepository;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::NotificationRepository;
pub use store_error::StoreError;
#[cfg(test)]
pub use template_repository::MockTemplateRepository;
pub use template_repository::TemplateRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
#[cfg(test)]
pub use user_token_repository::MockUserTokenRepository;
pub use user_token_repository::UserTokenRepository;
