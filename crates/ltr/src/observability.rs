//! Logging setup: human-readable diagnostics on stderr, optional JSONL file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Overrides the log file location entirely.
const LOG_PATH_ENV: &str = "LTR_LOG_PATH";

/// File name used inside a log directory.
const LOG_FILE_NAME: &str = "ltr.jsonl";

/// Where (and whether) to write the JSONL log.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// `LTR_LOG_PATH` wins; otherwise `ltr.jsonl` inside `log_dir`.
    ///
    /// `log_dir` already reflects `LTR_LOG_DIR` through config loading.
    pub fn from_env_with_overrides(log_dir: Option<PathBuf>) -> Self {
        let explicit = std::env::var_os(LOG_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let log_file = explicit.or_else(|| log_dir.map(|dir| dir.join(LOG_FILE_NAME)));
        Self { log_file }
    }

    /// The log file, if file logging is enabled.
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// Filter for stderr: `RUST_LOG` if set, else derived from `-q`/`-v`.
pub fn stderr_filter(quiet: bool, verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match (quiet, verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "debug",
            (false, _) => "trace",
        };
        EnvFilter::new(level)
    })
}

/// Filter for the log file: `RUST_LOG` if set, else the configured level.
pub fn file_filter(config_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level))
}

/// Install the global subscriber.
///
/// Hold the returned guard until exit so buffered file output is flushed.
pub fn init_observability(
    config: &ObservabilityConfig,
    stderr: EnvFilter,
    file: EnvFilter,
    ansi: bool,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(ansi)
        .with_filter(stderr);

    let (file_layer, guard) = match config.log_file() {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(file);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}

fn open_log_file(path: &Path) -> anyhow::Result<RollingFileAppender> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", path.display()))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("failed to open log file {}", path.display()))
}
