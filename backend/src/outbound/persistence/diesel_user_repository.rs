//! PostgreSQL-backed `UserRepository`.
//!
//! Users are inserted inside a transaction so the invitation path can share
//! the same unit of work. Updates use `updated_at` as an optimistic lock.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{StoreError, UserRepository};
use crate::domain::{User, invitation_digest};

use super::diesel_helpers::{
    bounded, create_in_transaction, ensure_affected, map_pool_error, with_transaction,
};
use super::models::{NewInvitationRow, NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::{user_invitations, users};

/// Diesel-backed implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Insert `user` on `conn`, copying the generated columns back into it.
///
/// # Errors
///
/// Unique-key clashes surface as [`StoreError::DuplicateEmail`] or
/// [`StoreError::DuplicateUsername`].
pub async fn insert_user(conn: &mut AsyncPgConnection, user: &mut User) -> Result<(), StoreError> {
    let row = diesel::insert_into(users::table)
        .values(NewUserRow::from(&*user))
        .returning(UserRow::as_returning())
        .get_result::<UserRow>(conn)
        .await?;

    user.id = row.id;
    user.verified = row.verified;
    user.created_at = row.created_at;
    user.updated_at = row.updated_at;
    Ok(())
}

/// Store the digest of `token` as an invitation for `user_id`.
pub async fn insert_invitation(
    conn: &mut AsyncPgConnection,
    token: &str,
    user_id: i64,
    expires_at: DateTime<Utc>,
) -> Result<(), StoreError> {
    let digest = invitation_digest(token);
    diesel::insert_into(user_invitations::table)
        .values(NewInvitationRow {
            token: &digest,
            user_id,
            expires_at,
        })
        .execute(conn)
        .await?;
    Ok(())
}

fn invitation_expiry(expiry: Duration) -> Result<DateTime<Utc>, StoreError> {
    chrono::Duration::from_std(expiry)
        .ok()
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| StoreError::query("invitation expiry is out of range"))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &mut User) -> Result<(), StoreError> {
        create_in_transaction!(&self.pool, "users.create", user, insert_user)
    }

    async fn create_and_invite(
        &self,
        user: &mut User,
        token: &str,
        expiry: Duration,
    ) -> Result<(), StoreError> {
        let expires_at = invitation_expiry(expiry)?;
        let mut staged = user.clone();
        let token = token.to_owned();

        let stored = with_transaction(&self.pool, "users.create_and_invite", |conn| {
            async move {
                insert_user(conn, &mut staged).await?;
                insert_invitation(conn, &token, staged.id, expires_at).await?;
                Ok(staged)
            }
            .scope_boxed()
        })
        .await?;

        debug!(user_id = stored.id, %expires_at, "user invited");
        *user = stored;
        Ok(())
    }

    async fn activate(&self, token: &str) -> Result<User, StoreError> {
        let digest = invitation_digest(token);

        with_transaction(&self.pool, "users.activate", |conn| {
            async move {
                let user_id = diesel::delete(
                    user_invitations::table
                        .filter(user_invitations::token.eq(digest.as_str()))
                        .filter(user_invitations::expires_at.gt(now)),
                )
                .returning(user_invitations::user_id)
                .get_result::<i64>(conn)
                .await?;

                let row = diesel::update(users::table.find(user_id))
                    .set((users::verified.eq(true), users::updated_at.eq(now)))
                    .returning(UserRow::as_returning())
                    .get_result::<UserRow>(conn)
                    .await?;

                Ok(User::from(row))
            }
            .scope_boxed()
        })
        .await
    }

    async fn get_by_id(&self, id: i64) -> Result<User, StoreError> {
        bounded("users.get_by_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = users::table
                .find(id)
                .select(UserRow::as_select())
                .first::<UserRow>(&mut conn)
                .await?;
            Ok(User::from(row))
        })
        .await
    }

    async fn update(&self, user: &mut User) -> Result<(), StoreError> {
        let updated_at = bounded("users.update", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let stamp = diesel::update(
                users::table
                    .filter(users::id.eq(user.id))
                    .filter(users::updated_at.eq(user.updated_at)),
            )
            .set((
                UserUpdate {
                    username: &user.username,
                    email: &user.email,
                },
                users::updated_at.eq(now),
            ))
            .returning(users::updated_at)
            .get_result::<DateTime<Utc>>(&mut conn)
            .await?;
            Ok(stamp)
        })
        .await?;

        user.updated_at = updated_at;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        bounded("users.delete", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::delete(users::table.find(id))
                .execute(&mut conn)
                .await?;
            ensure_affected(rows)
        })
        .await
    }
}
