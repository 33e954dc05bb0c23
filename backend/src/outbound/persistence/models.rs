//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them to and
//! from domain entities.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

use crate::domain::{
    Badge, Card, Follower, Friend, Notification, Password, Template, User, UserBadge, UserToken,
};

use super::schema::{
    badges, cards, followers, friends, notifications, templates, user_badges, user_invitations,
    user_tokens, users,
};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            password: Password::from_hash(row.password),
            verified: row.verified,
            updated_at: row.updated_at,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub verified: bool,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            username: &user.username,
            email: &user.email,
            password: user.password.hash(),
            verified: user.verified,
        }
    }
}

/// Columns a user update may touch; `updated_at` is set separately.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_invitations)]
pub(crate) struct NewInvitationRow<'a> {
    pub token: &'a str,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// User tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserTokenRow {
    pub id: i64,
    pub token: String,
    pub user_id: i64,
}

impl From<UserTokenRow> for UserToken {
    fn from(row: UserTokenRow) -> Self {
        Self {
            id: row.id,
            token: row.token,
            user_id: row.user_id,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_tokens)]
pub(crate) struct NewUserTokenRow<'a> {
    pub token: &'a str,
    pub user_id: i64,
}

// ---------------------------------------------------------------------------
// Templates and cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TemplateRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TemplateRow> for Template {
    fn from(row: TemplateRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            data: row.data,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = templates)]
pub(crate) struct TemplateFields<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub data: &'a Value,
}

impl<'a> From<&'a Template> for TemplateFields<'a> {
    fn from(template: &'a Template) -> Self {
        Self {
            title: &template.title,
            description: &template.description,
            data: &template.data,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CardRow {
    pub id: i64,
    pub title: String,
    pub data: Value,
    pub template_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CardRow> for Card {
    fn from(row: CardRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            data: row.data,
            template_id: row.template_id,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cards)]
pub(crate) struct NewCardRow<'a> {
    pub title: &'a str,
    pub data: &'a Value,
    pub template_id: i64,
    pub user_id: i64,
}

// ---------------------------------------------------------------------------
// Badges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = badges)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BadgeRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub icon: String,
}

impl From<BadgeRow> for Badge {
    fn from(row: BadgeRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            icon: row.icon,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = badges)]
pub(crate) struct NewBadgeRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub icon: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_badges)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserBadgeRow {
    pub user_id: i64,
    pub badge_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<UserBadgeRow> for UserBadge {
    fn from(row: UserBadgeRow) -> Self {
        Self {
            user_id: row.user_id,
            badge_id: row.badge_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_badges)]
pub(crate) struct NewUserBadgeRow {
    pub user_id: i64,
    pub badge_id: i64,
}

// ---------------------------------------------------------------------------
// Social graph
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = friends)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FriendRow {
    pub user_id: i64,
    pub friend_id: i64,
}

impl From<FriendRow> for Friend {
    fn from(row: FriendRow) -> Self {
        Self {
            user_id: row.user_id,
            friend_id: row.friend_id,
        }
    }
}

impl From<&Friend> for FriendRow {
    fn from(edge: &Friend) -> Self {
        Self {
            user_id: edge.user_id,
            friend_id: edge.friend_id,
        }
    }
}

#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = followers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FollowerRow {
    pub user_id: i64,
    pub follower_id: i64,
}

impl From<FollowerRow> for Follower {
    fn from(row: FollowerRow) -> Self {
        Self {
            user_id: row.user_id,
            follower_id: row.follower_id,
        }
    }
}

impl From<&Follower> for FollowerRow {
    fn from(edge: &Follower) -> Self {
        Self {
            user_id: edge.user_id,
            follower_id: edge.follower_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub card_id: i64,
    pub user_id: i64,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            card_id: row.card_id,
            user_id: row.user_id,
            read: row.read,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow {
    pub card_id: i64,
    pub user_id: i64,
    pub read: bool,
}
