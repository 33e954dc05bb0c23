//! Embedded PostgreSQL bootstrap for the store integration suites.
//!
//! `pg-embed-setup-unpriv` installs binaries and data under `/var/tmp` by
//! default. When `PG_RUNTIME_DIR` or `PG_DATA_DIR` is unset, both are pointed
//! at a fresh directory under the cargo target dir for the duration of the
//! bootstrap. Environment mutation is serialised through `env-lock`.
//!
//! Runs as root hand the cluster steps to the crate's `pg_worker` binary,
//! advertised through `PG_EMBEDDED_WORKER` unless the caller already set it.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const WORKER_ENV: &str = "PG_EMBEDDED_WORKER";
const WORKER_BINARY: &str = env!("CARGO_BIN_EXE_pg_worker");

const MAX_ATTEMPTS: u32 = 4;
const FIRST_RETRY_DELAY: Duration = Duration::from_millis(500);

const TRANSIENT_MARKERS: [&str; 7] = [
    "error decoding response body",
    "connection reset",
    "connection refused",
    "timed out",
    "temporarily unavailable",
    "dns error",
    "failed to lookup",
];

fn scratch_dirs() -> std::io::Result<(PathBuf, PathBuf)> {
    let target = std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("target"));
    let base = target
        .join("pg-embed")
        .join(format!("grace-{}-{}", std::process::id(), Uuid::new_v4()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((runtime_dir, data_dir))
}

fn is_transient(message: &str) -> bool {
    let lowered = message.to_lowercase();
    TRANSIENT_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Start a [`TestCluster`], retrying binary download hiccups with backoff.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let mut overrides: Vec<(&str, Option<String>)> = Vec::new();
    let missing_dirs =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    if missing_dirs {
        let (runtime_dir, data_dir) = scratch_dirs().map_err(|err| err.to_string())?;
        overrides.push(("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())));
        overrides.push(("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())));
    }
    if std::env::var_os(WORKER_ENV).is_none() {
        overrides.push((WORKER_ENV, Some(WORKER_BINARY.to_owned())));
    }
    let _env = (!overrides.is_empty()).then(|| env_lock::lock_env(overrides));

    let mut delay = FIRST_RETRY_DELAY;
    let mut attempt = 1;
    loop {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                let message = format!("{err:?}");
                if attempt >= MAX_ATTEMPTS || !is_transient(&message) {
                    return Err(message);
                }
                eprintln!(
                    "pg-embed: attempt {attempt}/{MAX_ATTEMPTS} failed, retrying in {delay:?}: {message}"
                );
                std::thread::sleep(delay);
                delay *= 2;
                attempt += 1;
            }
        }
    }
}
