use crate::error::{BuildError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Where and how much an extraction run logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// File prefix; rolled files look like `classmeta.2024-01-21`.
    pub component: String,
    pub directory: PathBuf,
    /// Mirror events to stderr with ANSI colours.
    pub stderr: bool,
    /// Filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            component: "classmeta".to_string(),
            directory: default_log_dir(),
            stderr: false,
            filter: "info".to_string(),
        }
    }
}

/// Installs the global subscriber described by `settings`.
///
/// Keep the returned guard alive for as long as logs should be flushed.
/// Fails if a global subscriber is already installed.
pub fn init_logging(settings: &LogSettings) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&settings.directory)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .map_err(|e| BuildError::Logging(format!("bad filter {:?}: {e}", settings.filter)))?;

    let appender = tracing_appender::rolling::daily(&settings.directory, &settings.component);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let stderr_layer = settings.stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(stderr_layer)
        .try_init()
        .map_err(|e| BuildError::Logging(e.to_string()))?;

    tracing::debug!(
        "Logging to {} as {}",
        settings.directory.display(),
        settings.component
    );
    Ok(guard)
}

/// `~/.classmeta/logs`, or `./.classmeta/logs` without a home directory.
pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".classmeta")
        .join("logs")
}
