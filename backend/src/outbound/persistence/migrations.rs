//! Embedded schema migrations.
//!
//! Migrations run over a blocking `PgConnection`; call [`run_migrations`]
//! before building the async pool or from `spawn_blocking`.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::StoreError;

/// Migrations compiled in from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply every pending migration to `database_url`.
///
/// Returns the number of migrations applied.
///
/// # Errors
///
/// [`StoreError::Connection`] when the database is unreachable and
/// [`StoreError::Query`] when a migration fails.
pub fn run_migrations(database_url: &str) -> Result<usize, StoreError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| StoreError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| StoreError::query(format!("migration: {err}")))?;

    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(applied.len())
}
