//! PostgreSQL-backed `FollowerRepository`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::PageRequest;

use crate::domain::ports::{FollowerRepository, StoreError};
use crate::domain::{Follower, User};

use super::diesel_helpers::{bounded, ensure_affected, map_pool_error, with_transaction};
use super::models::{FollowerRow, UserRow};
use super::pool::DbPool;
use super::schema::{followers, users};

#[derive(Clone)]
pub struct DieselFollowerRepository {
    pool: DbPool,
}

impl DieselFollowerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Insert the follow edge on `conn`.
pub async fn insert_follower(
    conn: &mut AsyncPgConnection,
    follower: &Follower,
) -> Result<(), StoreError> {
    diesel::insert_into(followers::table)
        .values(FollowerRow::from(follower))
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl FollowerRepository for DieselFollowerRepository {
    async fn create(&self, follower: &Follower) -> Result<(), StoreError> {
        let edge = *follower;
        with_transaction(&self.pool, "followers.create", |conn| {
            async move { insert_follower(conn, &edge).await }.scope_boxed()
        })
        .await
    }

    async fn get_by_id(&self, user_id: i64, follower_id: i64) -> Result<Follower, StoreError> {
        bounded("followers.get_by_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = followers::table
                .find((user_id, follower_id))
                .select(FollowerRow::as_select())
                .first::<FollowerRow>(&mut conn)
                .await?;
            Ok(Follower::from(row))
        })
        .await
    }

    async fn get_followers(&self, user_id: i64, page: PageRequest) -> Result<Vec<User>, StoreError> {
        bounded("followers.get_followers", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = followers::table
                .inner_join(users::table.on(users::id.eq(followers::follower_id)))
                .filter(followers::user_id.eq(user_id))
                .order((users::username.asc(), users::id.asc()))
                .limit(page.sql_limit())
                .offset(page.sql_offset())
                .select(UserRow::as_select())
                .load::<UserRow>(&mut conn)
                .await?;
            Ok(rows.into_iter().map(User::from).collect())
        })
        .await
    }

    async fn get_following(
        &self,
        follower_id: i64,
        page: PageRequest,
    ) -> Result<Vec<User>, StoreError> {
        bounded("followers.get_following", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = followers::table
                .inner_join(users::table.on(users::id.eq(followers::user_id)))
                .filter(followers::follower_id.eq(follower_id))
                .order((users::username.asc(), users::id.asc()))
                .limit(page.sql_limit())
                .offset(page.sql_offset())
                .select(UserRow::as_select())
                .load::<UserRow>(&mut conn)
                .await?;
            Ok(rows.into_iter().map(User::from).collect())
        })
        .await
    }

    async fn delete(&self, user_id: i64, follower_id: i64) -> Result<(), StoreError> {
        bounded("followers.delete", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::delete(followers::table.find((user_id, follower_id)))
                .execute(&mut conn)
                .await?;
            ensure_affected(rows)
        })
        .await
    }

    async fn is_following(&self, user_id: i64, follower_id: i64) -> Result<bool, StoreError> {
        bounded("followers.is_following", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let found = diesel::select(exists(followers::table.find((user_id, follower_id))))
                .get_result::<bool>(&mut conn)
                .await?;
            Ok(found)
        })
        .await
    }

    async fn unfollow(&self, user_id: i64, follower_id: i64) -> Result<(), StoreError> {
        self.delete(user_id, follower_id).await
    }
}
