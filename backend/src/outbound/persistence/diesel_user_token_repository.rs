//! PostgreSQL-backed `UserTokenRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::UserToken;
use crate::domain::ports::{StoreError, UserTokenRepository};

use super::diesel_helpers::{bounded, create_in_transaction, ensure_affected, map_pool_error};
use super::models::{NewUserTokenRow, UserTokenRow};
use super::pool::DbPool;
use super::schema::user_tokens;

#[derive(Clone)]
pub struct DieselUserTokenRepository {
    pool: DbPool,
}

impl DieselUserTokenRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Insert `token` on `conn`, filling in its identifier.
pub async fn insert_user_token(
    conn: &mut AsyncPgConnection,
    token: &mut UserToken,
) -> Result<(), StoreError> {
    token.id = diesel::insert_into(user_tokens::table)
        .values(NewUserTokenRow {
            token: &token.token,
            user_id: token.user_id,
        })
        .returning(user_tokens::id)
        .get_result::<i64>(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl UserTokenRepository for DieselUserTokenRepository {
    async fn create(&self, token: &mut UserToken) -> Result<(), StoreError> {
        create_in_transaction!(&self.pool, "user_tokens.create", token, insert_user_token)
    }

    async fn get_by_token(&self, token: &str) -> Result<UserToken, StoreError> {
        bounded("user_tokens.get_by_token", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = user_tokens::table
                .filter(user_tokens::token.eq(token))
                .select(UserTokenRow::as_select())
                .first::<UserTokenRow>(&mut conn)
                .await?;
            Ok(UserToken::from(row))
        })
        .await
    }

    async fn get_by_user_id(&self, user_id: i64) -> Result<Vec<UserToken>, StoreError> {
        bounded("user_tokens.get_by_user_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = user_tokens::table
                .filter(user_tokens::user_id.eq(user_id))
                .order(user_tokens::id.asc())
                .select(UserTokenRow::as_select())
                .load::<UserTokenRow>(&mut conn)
                .await?;
            Ok(rows.into_iter().map(UserToken::from).collect())
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        bounded("user_tokens.delete", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::delete(user_tokens::table.find(id))
                .execute(&mut conn)
                .await?;
            ensure_affected(rows)
        })
        .await
    }

    async fn delete_by_user_id(&self, user_id: i64) -> Result<(), StoreError> {
        bounded("user_tokens.delete_by_user_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::delete(user_tokens::table.filter(user_tokens::user_id.eq(user_id)))
                .execute(&mut conn)
                .await?;
            Ok(())
        })
        .await
    }
}
