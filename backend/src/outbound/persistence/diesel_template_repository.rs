//! PostgreSQL-backed `TemplateRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::PageRequest;

use crate::domain::Template;
use crate::domain::ports::{StoreError, TemplateRepository};

use super::diesel_helpers::{bounded, create_in_transaction, map_pool_error};
use super::models::{TemplateFields, TemplateRow};
use super::pool::DbPool;
use super::schema::templates;

#[derive(Clone)]
pub struct DieselTemplateRepository {
    pool: DbPool,
}

impl DieselTemplateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Insert `template` on `conn`, filling in its identifier and timestamps.
pub async fn insert_template(
    conn: &mut AsyncPgConnection,
    template: &mut Template,
) -> Result<(), StoreError> {
    let row = diesel::insert_into(templates::table)
        .values(TemplateFields::from(&*template))
        .returning(TemplateRow::as_returning())
        .get_result::<TemplateRow>(conn)
        .await?;
    *template = Template::from(row);
    Ok(())
}

#[async_trait]
impl TemplateRepository for DieselTemplateRepository {
    async fn get_by_id(&self, id: i64) -> Result<Template, StoreError> {
        bounded("templates.get_by_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = templates::table
                .find(id)
                .select(TemplateRow::as_select())
                .first::<TemplateRow>(&mut conn)
                .await?;
            Ok(Template::from(row))
        })
        .await
    }

    async fn create(&self, template: &mut Template) -> Result<(), StoreError> {
        create_in_transaction!(&self.pool, "templates.create", template, insert_template)
    }

    async fn update(&self, template: &mut Template) -> Result<(), StoreError> {
        let updated_at = bounded("templates.update", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let stamp = diesel::update(
                templates::table
                    .filter(templates::id.eq(template.id))
                    .filter(templates::updated_at.eq(template.updated_at)),
            )
            .set((
                TemplateFields::from(&*template),
                templates::updated_at.eq(now),
            ))
            .returning(templates::updated_at)
            .get_result::<DateTime<Utc>>(&mut conn)
            .await?;
            Ok(stamp)
        })
        .await?;

        template.updated_at = updated_at;
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Template>, StoreError> {
        bounded("templates.list", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = templates::table
                .order(templates::id.asc())
                .limit(page.sql_limit())
                .offset(page.sql_offset())
                .select(TemplateRow::as_select())
                .load::<TemplateRow>(&mut conn)
                .await?;
            Ok(rows.into_iter().map(Template::from).collect())
        })
        .await
    }
}
