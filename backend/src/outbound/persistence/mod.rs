//! PostgreSQL persistence adapters built on Diesel.
//!
//! - Repositories only translate between row structs and domain entities.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Every call runs under [`QUERY_TIMEOUT`] and reports
//!   [`StoreError`](crate::domain::ports::StoreError). The server enforces
//!   [`STATEMENT_TIMEOUT`] on each statement, so a timed-out write is rolled
//!   back rather than left running.
//! - Each repository exposes a connection-level `insert_*` function so
//!   several inserts can share one [`with_transaction`] scope.
//!
//! ```no_run
//! use grace::outbound::persistence::{DbPool, DieselStorage, PoolConfig};
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/grace")).await?;
//! let storage = DieselStorage::build(pool);
//! let user = storage.users.get_by_id(1).await?;
//! # let _ = user;
//! # Ok(())
//! # }
//! ```

pub(crate) mod diesel_helpers;
mod diesel_badge_repository;
mod diesel_card_repository;
mod diesel_follower_repository;
mod diesel_friend_repository;
mod diesel_notification_repository;
mod diesel_storage;
mod diesel_template_repository;
mod diesel_user_repository;
mod diesel_user_token_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_badge_repository::{
    DieselBadgeRepository, DieselUserBadgeRepository, insert_badge, insert_user_badge,
};
pub use diesel_card_repository::{DieselCardRepository, insert_card};
pub use diesel_follower_repository::{DieselFollowerRepository, insert_follower};
pub use diesel_friend_repository::{DieselFriendRepository, insert_friend};
pub use diesel_helpers::{QUERY_TIMEOUT, with_transaction};
pub use diesel_notification_repository::{DieselNotificationRepository, insert_notification};
pub use diesel_storage::DieselStorage;
pub use diesel_template_repository::{DieselTemplateRepository, insert_template};
pub use diesel_user_repository::{DieselUserRepository, insert_invitation, insert_user};
pub use diesel_user_token_repository::{DieselUserTokenRepository, insert_user_token};
pub use migrations::{MIGRATIONS, run_migrations};
pub use pool::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE, DbPool, PoolConfig, PoolError,
    STATEMENT_TIMEOUT,
};
