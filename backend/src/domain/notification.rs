//! Card notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notice that a card concerns a user, keyed by `(card_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub card_id: i64,
    pub user_id: i64,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build an unsaved, unread notification.
    #[must_use]
    pub fn new(card_id: i64, user_id: i64) -> Self {
        Self {
            card_id,
            user_id,
            read: false,
            created_at: DateTime::default(),
        }
    }
}
