//! Gratefulness cards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A short gratefulness note owned by one user.
///
/// `template_id` and `user_id` are fixed at creation; the store exposes no
/// way to change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub title: String,
    /// Opaque rendering payload produced by the editor.
    pub data: Value,
    pub template_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Build an unsaved card.
    pub fn new(title: impl Into<String>, data: Value, template_id: i64, user_id: i64) -> Self {
        Self {
            id: 0,
            title: title.into(),
            data,
            template_id,
            user_id,
            created_at: DateTime::default(),
            updated_at: DateTime::default(),
        }
    }
}
