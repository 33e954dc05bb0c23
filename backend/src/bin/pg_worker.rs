//! Worker process for `pg_embedded_setup_unpriv` when the integration suites
//! run as root.
//!
//! Invoked as `pg_worker <operation> <payload.json>`. The payload is a
//! serialised [`WorkerPayload`]: the PostgreSQL settings plus environment
//! overrides applied before the operation runs. `cleanup` removes the data
//! directory; `cleanup-full` removes the installation as well.

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use color_eyre::eyre::{Context, Report, Result, bail, eyre};
use pg_embedded_setup_unpriv::worker::WorkerPayload;
use postgresql_embedded::{PostgreSQL, Settings};
use tokio::runtime::Builder;

fn main() -> Result<()> {
    color_eyre::install()?;
    let invocation = Invocation::parse(env::args_os().skip(1))?;
    let payload = read_payload(&invocation.payload_path)?;
    run(invocation.operation, payload)
}

/// Cluster lifecycle step requested by the parent process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operation {
    Setup,
    Start,
    Stop,
    Cleanup,
    CleanupFull,
}

impl FromStr for Operation {
    type Err = Report;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "setup" => Ok(Self::Setup),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "cleanup" => Ok(Self::Cleanup),
            "cleanup-full" => Ok(Self::CleanupFull),
            other => bail!(
                "unknown worker operation '{other}'; expected setup, start, stop, cleanup or cleanup-full"
            ),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Setup => "setup",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Cleanup => "cleanup",
            Self::CleanupFull => "cleanup-full",
        })
    }
}

#[derive(Debug)]
struct Invocation {
    operation: Operation,
    payload_path: PathBuf,
}

impl Invocation {
    /// Parse the arguments that follow the program name.
    fn parse(mut args: impl Iterator<Item = OsString>) -> Result<Self> {
        let operation = args
            .next()
            .ok_or_else(|| eyre!("missing operation argument"))?
            .to_string_lossy()
            .parse()?;
        let payload_path = args
            .next()
            .map(PathBuf::from)
            .ok_or_else(|| eyre!("missing payload path argument"))?;
        if let Some(extra) = args.next() {
            bail!("unexpected argument: {}", extra.to_string_lossy());
        }
        Ok(Self {
            operation,
            payload_path,
        })
    }
}

fn read_payload(path: &Path) -> Result<WorkerPayload> {
    let raw = std::fs::read(path)
        .with_context(|| format!("failed to read worker payload {}", path.display()))?;
    serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse worker payload {}", path.display()))
}

fn run(operation: Operation, payload: WorkerPayload) -> Result<()> {
    let settings = payload
        .settings
        .into_settings()
        .map_err(|err| Report::new(err).wrap_err("invalid postgres settings in payload"))?;

    for (key, value) in payload.environment {
        // SAFETY: the worker is single-threaded until the runtime is built below.
        match value {
            Some(value) => unsafe { env::set_var(&key, value.expose()) },
            None => unsafe { env::remove_var(&key) },
        }
    }

    match operation {
        Operation::Cleanup => remove_tree(&settings.data_dir),
        Operation::CleanupFull => {
            remove_tree(&settings.data_dir)?;
            remove_tree(&settings.installation_dir)
        }
        Operation::Setup | Operation::Start | Operation::Stop => {
            drive_cluster(operation, settings)
        }
    }
}

fn drive_cluster(operation: Operation, settings: Settings) -> Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build worker runtime")?;
    let mut postgres = PostgreSQL::new(settings);
    runtime
        .block_on(async {
            match operation {
                Operation::Setup => postgres.setup().await,
                Operation::Start => postgres.start().await,
                _ => postgres.stop().await,
            }
        })
        .with_context(|| format!("embedded postgres {operation} failed"))?;

    if operation == Operation::Start {
        // Dropping the handle would stop the server this process just started.
        std::mem::forget(postgres);
    }
    Ok(())
}

/// Remove `path` recursively; a missing directory is already clean.
fn remove_tree(path: &Path) -> Result<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => {
            Err(err).with_context(|| format!("failed to remove {}", path.display()))
        }
    }
}
