//! Card templates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Starting layout for new cards.
///
/// Updates are guarded by `updated_at` in the same way as users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Template {
    /// Build an unsaved template.
    pub fn new(title: impl Into<String>, description: impl Into<String>, data: Value) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            data,
            created_at: DateTime::default(),
            updated_at: DateTime::default(),
        }
    }
}
