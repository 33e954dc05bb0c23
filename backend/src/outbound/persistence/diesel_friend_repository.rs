//! PostgreSQL-backed `FriendRepository`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::PageRequest;

use crate::domain::ports::{FriendRepository, StoreError};
use crate::domain::{Friend, User};

use super::diesel_helpers::{bounded, ensure_affected, map_pool_error, with_transaction};
use super::models::{FriendRow, UserRow};
use super::pool::DbPool;
use super::schema::{friends, users};

#[derive(Clone)]
pub struct DieselFriendRepository {
    pool: DbPool,
}

impl DieselFriendRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Insert the `user_id -> friend_id` edge on `conn`.
pub async fn insert_friend(conn: &mut AsyncPgConnection, friend: &Friend) -> Result<(), StoreError> {
    diesel::insert_into(friends::table)
        .values(FriendRow::from(friend))
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl FriendRepository for DieselFriendRepository {
    async fn create(&self, friend: &Friend) -> Result<(), StoreError> {
        let edge = *friend;
        with_transaction(&self.pool, "friends.create", |conn| {
            async move { insert_friend(conn, &edge).await }.scope_boxed()
        })
        .await
    }

    async fn get_by_id(&self, user_id: i64, friend_id: i64) -> Result<Friend, StoreError> {
        bounded("friends.get_by_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = friends::table
                .find((user_id, friend_id))
                .select(FriendRow::as_select())
                .first::<FriendRow>(&mut conn)
                .await?;
            Ok(Friend::from(row))
        })
        .await
    }

    async fn get_by_user_id(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Vec<User>, StoreError> {
        bounded("friends.get_by_user_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = friends::table
                .inner_join(users::table.on(users::id.eq(friends::friend_id)))
                .filter(friends::user_id.eq(user_id))
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

    async fn delete(&self, user_id: i64, friend_id: i64) -> Result<(), StoreError> {
        bounded("friends.delete", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::delete(friends::table.find((user_id, friend_id)))
                .execute(&mut conn)
                .await?;
            ensure_affected(rows)
        })
        .await
    }

    async fn is_friend(&self, user_id: i64, friend_id: i64) -> Result<bool, StoreError> {
        bounded("friends.is_friend", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let found = diesel::select(exists(friends::table.find((user_id, friend_id))))
                .get_result::<bool>(&mut conn)
                .await?;
            Ok(found)
        })
        .await
    }
}
