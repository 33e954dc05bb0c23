//! Badges and their award records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Achievement a user can earn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Icon identifier understood by the client.
    pub icon: String,
}

impl Badge {
    /// Build an unsaved badge.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            icon: icon.into(),
        }
    }
}

/// Award of one badge to one user, keyed by `(user_id, badge_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBadge {
    pub user_id: i64,
    pub badge_id: i64,
    pub created_at: DateTime<Utc>,
}

impl UserBadge {
    /// Build an unsaved award.
    #[must_use]
    pub fn new(user_id: i64, badge_id: i64) -> Self {
        Self {
            user_id,
            badge_id,
            created_at: DateTime::default(),
        }
    }
}
