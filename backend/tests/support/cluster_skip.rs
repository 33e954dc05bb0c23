//! Opt-in and skip policy for the embedded cluster suites.
//!
//! Store integration tests only run with `RUN_PG_EMBEDDED=1`. When the
//! cluster then fails to start, `SKIP_TEST_CLUSTER` decides between a skip
//! marker and a hard failure.

fn env_is_truthy(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Whether the embedded cluster suites were requested.
pub fn embedded_cluster_requested() -> bool {
    env_is_truthy("RUN_PG_EMBEDDED")
}

/// Handle a cluster bootstrap failure.
///
/// Prints a `SKIP-TEST-CLUSTER` marker and returns `None` when
/// `SKIP_TEST_CLUSTER` is truthy; panics otherwise so CI breakage stays loud.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if env_is_truthy("SKIP_TEST_CLUSTER") {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
