// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `bitdiag.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BitdiagConfig {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

/// Diagnostic engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Widest bit row accepted (1-63)
    pub max_width: usize,
    /// Evaluate the oxygen and CO2 filters concurrently
    pub parallel_filters: bool,
    /// Verify count and set-size invariants on every filter step
    pub check_invariants: bool,
    /// Keep per-column filter steps in reports
    pub record_trace: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_width: 63,
            parallel_filters: true,
            check_invariants: true,
            record_trace: true,
        }
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level (trace, debug, info, warn, error)
    pub level: String,
    pub format: LogFormat,
    /// Crates logged at debug level regardless of `level`
    pub debug_crates: Vec<String>,
    /// Base directory for per-run log files; console only when unset
    pub log_dir: Option<PathBuf>,
    /// Number of most recent run directories kept under `log_dir`
    pub retained_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            debug_crates: Vec::new(),
            log_dir: None,
            retained_runs: 10,
        }
    }
}
