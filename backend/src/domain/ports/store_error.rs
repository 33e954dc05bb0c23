//! Error kinds shared by every store repository port.

use super::define_port_error;

define_port_error! {
    /// Failures surfaced by store repositories.
    ///
    /// `Connection`, `Query` and `Timeout` form the I/O class: opaque driver
    /// or database failures that callers surface without interpretation.
    pub enum StoreError {
        /// No row matched the lookup, update or delete key.
        ///
        /// Optimistic updates also report this when the caller's
        /// `updated_at` no longer matches the stored row.
        NotFound => "resource not found",
        /// Another user already registered this email address.
        DuplicateEmail => "a user with that email already exists",
        /// Another user already registered this username.
        DuplicateUsername => "a user with that username already exists",
        /// A pooled connection could not be obtained or was lost.
        Connection { message: String } => "store connection failed: {message}",
        /// The statement failed inside the database.
        Query { message: String } => "store query failed: {message}",
        /// The call exceeded the per-call store timeout.
        Timeout { operation: String } => "store operation timed out: {operation}",
    }
}

impl StoreError {
    /// Whether the error belongs to the opaque I/O class.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::Query { .. } | Self::Timeout { .. }
        )
    }

    /// Whether the error reports a unique-key clash on user creation.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateEmail | Self::DuplicateUsername)
    }
}
