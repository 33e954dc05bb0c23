//! PostgreSQL-backed `NotificationRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::PageRequest;

use crate::domain::Notification;
use crate::domain::ports::{NotificationRepository, StoreError};

use super::diesel_helpers::{bounded, create_in_transaction, ensure_affected, map_pool_error};
use super::models::{NewNotificationRow, NotificationRow};
use super::pool::DbPool;
use super::schema::notifications;

#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn list_for_user(
        &self,
        operation: &str,
        user_id: i64,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<Notification>, StoreError> {
        bounded(operation, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let mut query = notifications::table
                .filter(notifications::user_id.eq(user_id))
                .select(NotificationRow::as_select())
                .into_boxed();
            if unread_only {
                query = query.filter(notifications::read.eq(false));
            }
            let rows = query
                .order((notifications::created_at.desc(), notifications::card_id.desc()))
                .limit(page.sql_limit())
                .offset(page.sql_offset())
                .load::<NotificationRow>(&mut conn)
                .await?;
            Ok(rows.into_iter().map(Notification::from).collect())
        })
        .await
    }
}

/// Insert `notification` on `conn`, filling in `created_at`.
pub async fn insert_notification(
    conn: &mut AsyncPgConnection,
    notification: &mut Notification,
) -> Result<(), StoreError> {
    let row = diesel::insert_into(notifications::table)
        .values(NewNotificationRow {
            card_id: notification.card_id,
            user_id: notification.user_id,
            read: notification.read,
        })
        .returning(NotificationRow::as_returning())
        .get_result::<NotificationRow>(conn)
        .await?;
    *notification = Notification::from(row);
    Ok(())
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn create(&self, notification: &mut Notification) -> Result<(), StoreError> {
        create_in_transaction!(
            &self.pool,
            "notifications.create",
            notification,
            insert_notification
        )
    }

    async fn get_by_id(&self, card_id: i64, user_id: i64) -> Result<Notification, StoreError> {
        bounded("notifications.get_by_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = notifications::table
                .find((card_id, user_id))
                .select(NotificationRow::as_select())
                .first::<NotificationRow>(&mut conn)
                .await?;
            Ok(Notification::from(row))
        })
        .await
    }

    async fn get_by_user_id(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Vec<Notification>, StoreError> {
        self.list_for_user("notifications.get_by_user_id", user_id, false, page)
            .await
    }

    async fn update(&self, notification: &Notification) -> Result<(), StoreError> {
        bounded("notifications.update", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::update(
                notifications::table.find((notification.card_id, notification.user_id)),
            )
            .set(notifications::read.eq(notification.read))
            .execute(&mut conn)
            .await?;
            ensure_affected(rows)
        })
        .await
    }

    async fn delete(&self, card_id: i64, user_id: i64) -> Result<(), StoreError> {
        bounded("notifications.delete", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::delete(notifications::table.find((card_id, user_id)))
                .execute(&mut conn)
                .await?;
            ensure_affected(rows)
        })
        .await
    }

    async fn get_unread_by_user_id(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Vec<Notification>, StoreError> {
        self.list_for_user("notifications.get_unread_by_user_id", user_id, true, page)
            .await
    }

    async fn mark_as_read(&self, card_id: i64, user_id: i64) -> Result<(), StoreError> {
        bounded("notifications.mark_as_read", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::update(notifications::table.find((card_id, user_id)))
                .set(notifications::read.eq(true))
                .execute(&mut conn)
                .await?;
            ensure_affected(rows)
        })
        .await
    }
}
