//! Directed edges of the social graph.
//!
//! Both edge kinds are asymmetric: `A -> B` says nothing about `B -> A`.

use serde::{Deserialize, Serialize};

/// `user_id` befriended `friend_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Friend {
    pub user_id: i64,
    pub friend_id: i64,
}

/// `follower_id` follows `user_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Follower {
    /// The followed user.
    pub user_id: i64,
    /// The following user.
    pub follower_id: i64,
}
