// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output is always installed. With the `file-logging` feature and a
//! configured `log_dir`, each run also writes JSON lines into its own
//! timestamped folder:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       └── bitdiag.log.2025-01-01
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bitdiag_config::{LogFormat, LoggingConfig};
use chrono::{NaiveDateTime, Utc};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Keeps file writers alive; logs are flushed when it is dropped
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving file logs, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// `EnvFilter` for the configured level plus per-crate debug flags
pub fn build_filter(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<EnvFilter> {
    let directives = debug_flags.to_filter_string(&config.level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter: {}", directives))
}

/// Install the global subscriber
///
/// # Errors
/// Fails if the filter cannot be parsed, the run folder cannot be created, or
/// a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let console = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false);
    let console_filter = build_filter(config, debug_flags)?;
    match config.format {
        LogFormat::Text => layers.push(console.with_filter(console_filter).boxed()),
        LogFormat::Json => layers.push(console.json().with_filter(console_filter).boxed()),
    }

    #[cfg(feature = "file-logging")]
    let (log_dir, file_guards) = match &config.log_dir {
        Some(base) => {
            let run_dir = create_run_dir(base)?;
            prune_runs(base, config.retained_runs)?;

            let appender = tracing_appender::rolling::daily(&run_dir, "bitdiag.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_filter(build_filter(config, debug_flags)?)
                    .boxed(),
            );
            (Some(run_dir), vec![guard])
        }
        None => (None, Vec::new()),
    };

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    #[cfg(not(feature = "file-logging"))]
    let log_dir = {
        if let Some(dir) = &config.log_dir {
            tracing::warn!(target: "bitdiag-observability",
                "log_dir {} ignored: built without the file-logging feature",
                dir.display()
            );
        }
        None
    };

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir,
    })
}

/// Create `base/run_<timestamp>` for the current run
pub fn create_run_dir(base: &Path) -> Result<PathBuf> {
    let run_dir = base.join(format!(
        "{}{}",
        RUN_PREFIX,
        Utc::now().format(RUN_TIMESTAMP_FORMAT)
    ));
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("Failed to create log directory: {}", run_dir.display()))?;
    Ok(run_dir)
}

/// Delete all but the `keep` newest `run_<timestamp>` folders under `base`.
///
/// Folders whose name does not parse as a run timestamp are left alone.
/// Returns the removed paths.
pub fn prune_runs(base: &Path, keep: usize) -> Result<Vec<PathBuf>> {
    if !base.exists() {
        return Ok(Vec::new());
    }

    let mut runs: Vec<(NaiveDateTime, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(base)
        .with_context(|| format!("Failed to list log directory: {}", base.display()))?
    {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let stamp = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix(RUN_PREFIX))
            .and_then(|ts| NaiveDateTime::parse_from_str(ts, RUN_TIMESTAMP_FORMAT).ok());
        if let Some(stamp) = stamp {
            runs.push((stamp, path));
        }
    }

    runs.sort();
    let excess = runs.len().saturating_sub(keep);
    let mut removed = Vec::with_capacity(excess);
    for (_, path) in runs.into_iter().take(excess) {
        std::fs::remove_dir_all(&path)
            .with_context(|| format!("Failed to remove old log directory: {}", path.display()))?;
        removed.push(path);
    }
    Ok(removed)
}
