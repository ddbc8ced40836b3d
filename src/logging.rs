//! Logging setup for the binary.
//!
//! The terminal is in raw alternate-screen mode while playing, so records go
//! to a file. Without `BLOCKFALL_LOG_PATH` no logger is installed and the
//! `log` macros in the library crates are no-ops.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Filter variable, same syntax as `RUST_LOG`.
pub const LOG_FILTER_ENV: &str = "BLOCKFALL_LOG";

pub const DEFAULT_FILTER: &str = "info";

/// Install `env_logger` appending to `path`.
pub fn init_file_logger(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    Builder::from_env(Env::default().filter_or(LOG_FILTER_ENV, DEFAULT_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("install logger")
}
