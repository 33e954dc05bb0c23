//! PostgreSQL-backed `BadgeRepository` and `UserBadgeRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{BadgeRepository, StoreError, UserBadgeRepository};
use crate::domain::{Badge, UserBadge};

use super::diesel_helpers::{bounded, create_in_transaction, ensure_affected, map_pool_error};
use super::models::{BadgeRow, NewBadgeRow, NewUserBadgeRow, UserBadgeRow};
use super::pool::DbPool;
use super::schema::{badges, user_badges};

#[derive(Clone)]
pub struct DieselBadgeRepository {
    pool: DbPool,
}

impl DieselBadgeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Insert `badge` on `conn`, filling in its identifier.
pub async fn insert_badge(conn: &mut AsyncPgConnection, badge: &mut Badge) -> Result<(), StoreError> {
    badge.id = diesel::insert_into(badges::table)
        .values(NewBadgeRow {
            title: &badge.title,
            description: &badge.description,
            icon: &badge.icon,
        })
        .returning(badges::id)
        .get_result::<i64>(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl BadgeRepository for DieselBadgeRepository {
    async fn get_by_id(&self, id: i64) -> Result<Badge, StoreError> {
        bounded("badges.get_by_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = badges::table
                .find(id)
                .select(BadgeRow::as_select())
                .first::<BadgeRow>(&mut conn)
                .await?;
            Ok(Badge::from(row))
        })
        .await
    }

    async fn create(&self, badge: &mut Badge) -> Result<(), StoreError> {
        create_in_transaction!(&self.pool, "badges.create", badge, insert_badge)
    }

    async fn list_all(&self) -> Result<Vec<Badge>, StoreError> {
        bounded("badges.list_all", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = badges::table
                .order((badges::title.asc(), badges::id.asc()))
                .select(BadgeRow::as_select())
                .load::<BadgeRow>(&mut conn)
                .await?;
            Ok(rows.into_iter().map(Badge::from).collect())
        })
        .await
    }
}

#[derive(Clone)]
pub struct DieselUserBadgeRepository {
    pool: DbPool,
}

impl DieselUserBadgeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Award a badge on `conn`, filling in `created_at`.
pub async fn insert_user_badge(
    conn: &mut AsyncPgConnection,
    award: &mut UserBadge,
) -> Result<(), StoreError> {
    award.created_at = diesel::insert_into(user_badges::table)
        .values(NewUserBadgeRow {
            user_id: award.user_id,
            badge_id: award.badge_id,
        })
        .returning(user_badges::created_at)
        .get_result(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl UserBadgeRepository for DieselUserBadgeRepository {
    async fn create(&self, award: &mut UserBadge) -> Result<(), StoreError> {
        create_in_transaction!(&self.pool, "user_badges.create", award, insert_user_badge)
    }

    async fn get_by_id(&self, user_id: i64, badge_id: i64) -> Result<UserBadge, StoreError> {
        bounded("user_badges.get_by_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = user_badges::table
                .find((user_id, badge_id))
                .select(UserBadgeRow::as_select())
                .first::<UserBadgeRow>(&mut conn)
                .await?;
            Ok(UserBadge::from(row))
        })
        .await
    }

    async fn get_by_user_id(&self, user_id: i64) -> Result<Vec<Badge>, StoreError> {
        bounded("user_badges.get_by_user_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = user_badges::table
                .inner_join(badges::table)
                .filter(user_badges::user_id.eq(user_id))
                .order((badges::title.asc(), badges::id.asc()))
                .select(BadgeRow::as_select())
                .load::<BadgeRow>(&mut conn)
                .await?;
            Ok(rows.into_iter().map(Badge::from).collect())
        })
        .await
    }

    async fn delete(&self, user_id: i64, badge_id: i64) -> Result<(), StoreError> {
        bounded("user_badges.delete", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::delete(user_badges::table.find((user_id, badge_id)))
                .execute(&mut conn)
                .await?;
            ensure_affected(rows)
        })
        .await
    }
}
