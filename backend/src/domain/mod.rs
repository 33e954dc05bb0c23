//! Domain entities, value types and ports.
//!
//! Entities are plain data. Identifiers are `i64` and stay zero until the
//! store assigns them; timestamps are filled in by the store as well.

pub mod badge;
pub mod card;
pub mod error;
pub mod notification;
pub mod password;
pub mod ports;
pub mod social;
pub mod storage;
pub mod template;
pub mod trace_id;
pub mod user;
pub mod user_token;

pub use self::badge::{Badge, UserBadge};
pub use self::card::Card;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::notification::Notification;
pub use self::password::{Password, PasswordError};
pub use self::social::{Follower, Friend};
pub use self::storage::Storage;
pub use self::template::Template;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::User;
pub use self::user_token::{UserToken, invitation_digest};
