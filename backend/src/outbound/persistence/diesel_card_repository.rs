//! PostgreSQL-backed `CardRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::PageRequest;

use crate::domain::Card;
use crate::domain::ports::{CardRepository, StoreError};

use super::diesel_helpers::{bounded, create_in_transaction, ensure_affected, map_pool_error};
use super::models::{CardRow, NewCardRow};
use super::pool::DbPool;
use super::schema::cards;

#[derive(Clone)]
pub struct DieselCardRepository {
    pool: DbPool,
}

impl DieselCardRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Insert `card` on `conn`, filling in its identifier and timestamps.
pub async fn insert_card(conn: &mut AsyncPgConnection, card: &mut Card) -> Result<(), StoreError> {
    let row = diesel::insert_into(cards::table)
        .values(NewCardRow {
            title: &card.title,
            data: &card.data,
            template_id: card.template_id,
            user_id: card.user_id,
        })
        .returning(CardRow::as_returning())
        .get_result::<CardRow>(conn)
        .await?;
    *card = Card::from(row);
    Ok(())
}

#[async_trait]
impl CardRepository for DieselCardRepository {
    async fn get_by_id(&self, id: i64) -> Result<Card, StoreError> {
        bounded("cards.get_by_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = cards::table
                .find(id)
                .select(CardRow::as_select())
                .first::<CardRow>(&mut conn)
                .await?;
            Ok(Card::from(row))
        })
        .await
    }

    async fn create(&self, card: &mut Card) -> Result<(), StoreError> {
        create_in_transaction!(&self.pool, "cards.create", card, insert_card)
    }

    async fn get_by_user_id(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Vec<Card>, StoreError> {
        bounded("cards.get_by_user_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = cards::table
                .filter(cards::user_id.eq(user_id))
                .order((cards::created_at.desc(), cards::id.desc()))
                .limit(page.sql_limit())
                .offset(page.sql_offset())
                .select(CardRow::as_select())
                .load::<CardRow>(&mut conn)
                .await?;
            Ok(rows.into_iter().map(Card::from).collect())
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        bounded("cards.delete", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::delete(cards::table.find(id))
                .execute(&mut conn)
                .await?;
            ensure_affected(rows)
        })
        .await
    }
}
