//! File logging for the demo editor.
//!
//! The terminal belongs to the TUI, so events go to a daily rotated file
//! in the user's local data directory (`~/.local/share/cmdpal/logs/` on
//! Linux). `CMDPAL_LOG_FILE` points the log somewhere else; the rotation
//! date is appended to that file name. `RUST_LOG` overrides the default
//! `cmdpal=info` filter.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILTER: &str = "cmdpal=info";
const LOG_FILE_NAME: &str = "cmdpal.log";

pub const LOG_FILE_ENV: &str = "CMDPAL_LOG_FILE";

/// Where the rolling appender writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    pub directory: PathBuf,
    pub file_name: String,
}

impl LogTarget {
    pub fn resolve(override_path: Option<&Path>) -> Result<Self> {
        match override_path {
            Some(path) => Self::from_file_path(path),
            None => Ok(Self {
                directory: log_directory()?,
                file_name: LOG_FILE_NAME.to_string(),
            }),
        }
    }

    fn from_file_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow!("{LOG_FILE_ENV} has no file name: {}", path.display()))?;
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self {
            directory,
            file_name,
        })
    }
}

/// Installs the global subscriber. Fails when the log directory can't be
/// determined or created, or when a subscriber is already set.
pub fn init() -> Result<()> {
    let override_path = std::env::var_os(LOG_FILE_ENV).map(PathBuf::from);
    let target = LogTarget::resolve(override_path.as_deref())?;
    std::fs::create_dir_all(&target.directory).with_context(|| {
        format!(
            "failed to create log directory: {}",
            target.directory.display()
        )
    })?;

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, &target.directory, &target.file_name);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "cmdpal starting up");
    tracing::debug!(log_dir = %target.directory.display(), "log directory");

    Ok(())
}

fn log_directory() -> Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("could not determine local data directory"))?;

    Ok(base_dir.join("cmdpal").join("logs"))
}
