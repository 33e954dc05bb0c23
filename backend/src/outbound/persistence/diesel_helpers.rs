//! Shared plumbing for the Diesel repositories: error mapping, the per-call
//! timeout and the transaction helper.

use std::future::Future;
use std::time::Duration;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedBoxFuture;
use diesel_async::{AsyncConnection, AsyncPgConnection};
use tracing::{debug, warn};

use crate::domain::ports::StoreError;

use super::pool::{DbPool, PoolError};

/// Upper bound on a single store call, checkout included.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) const USERS_EMAIL_KEY: &str = "users_email_key";
pub(crate) const USERS_USERNAME_KEY: &str = "users_username_key";

/// Message PostgreSQL reports when `statement_timeout` cancels a statement.
///
/// diesel-async does not expose the SQLSTATE (`57014`), so the message is the
/// only signal available.
const STATEMENT_TIMEOUT_MESSAGE: &str = "canceling statement due to statement timeout";
const STATEMENT_OPERATION: &str = "statement";

/// Map pool failures to the connection error class.
pub(crate) fn map_pool_error(error: PoolError) -> StoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreError::connection(message)
        }
    }
}

/// Map Diesel errors to [`StoreError`].
///
/// Unique violations are classified by constraint name only.
pub(crate) fn map_diesel_error(error: DieselError) -> StoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => StoreError::not_found(),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            match info.constraint_name() {
                Some(USERS_EMAIL_KEY) => StoreError::duplicate_email(),
                Some(USERS_USERNAME_KEY) => StoreError::duplicate_username(),
                _ => StoreError::query(info.message()),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            StoreError::connection(info.message())
        }
        DieselError::DatabaseError(_, info) if info.message() == STATEMENT_TIMEOUT_MESSAGE => {
            StoreError::timeout(STATEMENT_OPERATION)
        }
        DieselError::DatabaseError(_, info) => StoreError::query(info.message()),
        DieselError::BrokenTransactionManager => {
            StoreError::connection("transaction manager left the connection unusable")
        }
        other => StoreError::query(other.to_string()),
    }
}

impl From<DieselError> for StoreError {
    fn from(error: DieselError) -> Self {
        map_diesel_error(error)
    }
}

/// Turn a zero affected-row count into [`StoreError::NotFound`].
pub(crate) fn ensure_affected(rows: usize) -> Result<(), StoreError> {
    if rows == 0 {
        Err(StoreError::not_found())
    } else {
        Ok(())
    }
}

/// Run `call` under [`QUERY_TIMEOUT`].
pub(crate) async fn bounded<T, F>(operation: &str, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    bounded_by(QUERY_TIMEOUT, operation, call).await
}

/// Run `call` under `limit`, reporting [`StoreError::Timeout`] when it
/// expires or when the server cancelled a statement on its own bound.
///
/// Dropping the future releases any checked-out connection but does not stop
/// the statement on the server; the pooled session's `statement_timeout`
/// does that.
pub(crate) async fn bounded_by<T, F>(
    limit: Duration,
    operation: &str,
    call: F,
) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(Err(StoreError::Timeout { .. })) => {
            warn!(operation, "statement cancelled by the server timeout");
            Err(StoreError::timeout(operation))
        }
        Ok(result) => result,
        Err(_) => {
            warn!(operation, limit_ms = limit.as_millis(), "store call timed out");
            Err(StoreError::timeout(operation))
        }
    }
}

/// Run `work` inside one transaction on one pooled connection.
///
/// Commits when `work` returns `Ok`, rolls back and returns the original
/// error otherwise. The whole unit, checkout included, is bounded by
/// [`QUERY_TIMEOUT`].
///
/// # Examples
/// ```no_run
/// use diesel_async::scoped_futures::ScopedFutureExt;
/// use grace::domain::{Badge, ports::StoreError};
/// use grace::outbound::persistence::{DbPool, insert_badge, with_transaction};
///
/// async fn seed(pool: &DbPool) -> Result<Badge, StoreError> {
///     let mut badge = Badge::new("First card", "Sent a first card", "star");
///     with_transaction(pool, "seed.badge", |conn| {
///         async move {
///             insert_badge(conn, &mut badge).await?;
///             Ok(badge)
///         }
///         .scope_boxed()
///     })
///     .await
/// }
/// ```
pub async fn with_transaction<'a, T, F>(
    pool: &DbPool,
    operation: &str,
    work: F,
) -> Result<T, StoreError>
where
    F: for<'r> FnOnce(&'r mut AsyncPgConnection) -> ScopedBoxFuture<'a, 'r, Result<T, StoreError>>
        + Send
        + 'a,
    T: Send + 'a,
{
    bounded(operation, async move {
        let mut conn = pool.get().await.map_err(map_pool_error)?;
        AsyncConnection::transaction(&mut *conn, work).await
    })
    .await
}

/// Insert a clone of `$entity` inside [`with_transaction`] and copy the
/// stored row back over `$entity` only after the commit.
///
/// `$insert` is a connection-level insert function taking
/// `(&mut AsyncPgConnection, &mut Entity)`.
macro_rules! create_in_transaction {
    ($pool:expr, $operation:expr, $entity:expr, $insert:path) => {{
        let mut staged = $entity.clone();
        let stored = $crate::outbound::persistence::with_transaction($pool, $operation, |conn| {
            ::diesel_async::scoped_futures::ScopedFutureExt::scope_boxed(async move {
                $insert(conn, &mut staged).await?;
                Ok(staged)
            })
        })
        .await?;
        *$entity = stored;
        Ok(())
    }};
}

pub(crate) use create_in_transaction;

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    struct ErrorInfo {
        message: &'static str,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for ErrorInfo {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            Some("users")
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(
        kind: DatabaseErrorKind,
        message: &'static str,
        constraint: Option<&'static str>,
    ) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(ErrorInfo { message, constraint }))
    }

    #[rstest]
    fn not_found_maps_to_not_found() {
        assert_eq!(map_diesel_error(DieselError::NotFound), StoreError::NotFound);
    }

    #[rstest]
    #[case(Some(USERS_EMAIL_KEY), StoreError::DuplicateEmail)]
    #[case(Some(USERS_USERNAME_KEY), StoreError::DuplicateUsername)]
    fn unique_violations_are_classified_by_constraint(
        #[case] constraint: Option<&'static str>,
        #[case] expected: StoreError,
    ) {
        let error = database_error(DatabaseErrorKind::UniqueViolation, "duplicate key", constraint);
        assert_eq!(map_diesel_error(error), expected);
    }

    #[rstest]
    fn message_text_alone_never_signals_a_duplicate() {
        let error = database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"users_email_key\"",
            None,
        );
        assert!(map_diesel_error(error).is_io());
    }

    #[rstest]
    fn other_unique_violations_are_query_errors() {
        let error = database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key",
            Some("user_tokens_token_key"),
        );
        assert_eq!(map_diesel_error(error), StoreError::query("duplicate key"));
    }

    #[rstest]
    fn closed_connections_map_to_connection() {
        let error = database_error(DatabaseErrorKind::ClosedConnection, "server closed", None);
        assert_eq!(map_diesel_error(error), StoreError::connection("server closed"));
    }

    #[rstest]
    fn server_cancellations_map_to_timeout() {
        let error = database_error(DatabaseErrorKind::Unknown, STATEMENT_TIMEOUT_MESSAGE, None);
        assert!(matches!(map_diesel_error(error), StoreError::Timeout { .. }));
    }

    #[rstest]
    fn user_cancellations_stay_query_errors() {
        let error = database_error(
            DatabaseErrorKind::Unknown,
            "canceling statement due to user request",
            None,
        );
        assert_eq!(
            map_diesel_error(error),
            StoreError::query("canceling statement due to user request")
        );
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let error = map_pool_error(PoolError::checkout("connection refused"));
        assert_eq!(error, StoreError::connection("connection refused"));
    }

    #[rstest]
    #[case(0, Err(StoreError::NotFound))]
    #[case(1, Ok(()))]
    #[case(3, Ok(()))]
    fn zero_rows_means_not_found(#[case] rows: usize, #[case] expected: Result<(), StoreError>) {
        assert_eq!(ensure_affected(rows), expected);
    }

    #[tokio::test]
    async fn slow_calls_time_out() {
        let result: Result<(), StoreError> =
            bounded_by(Duration::from_millis(10), "cards.get_by_id", async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok(())
            })
            .await;
        assert_eq!(result, Err(StoreError::timeout("cards.get_by_id")));
    }

    #[tokio::test]
    async fn server_timeouts_name_the_calling_operation() {
        let result: Result<(), StoreError> = bounded("users.update", async {
            Err(map_diesel_error(database_error(
                DatabaseErrorKind::Unknown,
                STATEMENT_TIMEOUT_MESSAGE,
                None,
            )))
        })
        .await;
        assert_eq!(result, Err(StoreError::timeout("users.update")));
    }

    #[tokio::test]
    async fn fast_calls_pass_through() {
        let result = bounded("badges.list_all", async { Ok::<_, StoreError>(7) }).await;
        assert_eq!(result, Ok(7));
    }
}
