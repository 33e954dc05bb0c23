//! Shared helpers for the store integration suites.
//!
//! Each suite boots its own embedded cluster, recreates a named database and
//! applies the embedded migrations before building a pool.

mod cluster_skip;

pub use cluster_skip::{embedded_cluster_requested, handle_cluster_setup_failure};

use grace::outbound::persistence::run_migrations;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};

/// Render a `postgres` error with its SQLSTATE, detail and hint.
///
/// `postgres::Error`'s `Display` collapses database errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}

/// Drop and recreate `database` on the cluster.
///
/// Runs through `postgres` on the maintenance database since `DROP DATABASE`
/// cannot run inside a transaction.
pub fn reset_database(cluster: &TestCluster, database: &str) -> Result<(), String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!(
            r#"DROP DATABASE IF EXISTS "{database}" WITH (FORCE); CREATE DATABASE "{database}";"#
        ))
        .map_err(|err| format_postgres_error(&err))
}

/// Apply the embedded migrations to `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    run_migrations(url).map(|_| ()).map_err(|err| err.to_string())
}

/// Count rows in `table` matching `predicate`, e.g. `"username = 'ada'"`.
pub fn count_rows(url: &str, table: &str, predicate: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one(
            &format!("SELECT COUNT(*) FROM {table} WHERE {predicate}"),
            &[],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get::<_, i64>(0))
}

/// A second session holding `FOR UPDATE` on one row until released.
pub struct RowLock {
    client: Client,
}

impl RowLock {
    /// Open a transaction on `url` and lock the `table` row with `id`.
    pub fn acquire(url: &str, table: &str, id: i64) -> Result<Self, String> {
        let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
        client
            .batch_execute("BEGIN")
            .map_err(|err| format_postgres_error(&err))?;
        client
            .query_one(
                &format!("SELECT id FROM {table} WHERE id = $1 FOR UPDATE"),
                &[&id],
            )
            .map_err(|err| format_postgres_error(&err))?;
        Ok(Self { client })
    }

    /// Roll back the locking transaction.
    pub fn release(mut self) -> Result<(), String> {
        self.client
            .batch_execute("ROLLBACK")
            .map_err(|err| format_postgres_error(&err))
    }
}
