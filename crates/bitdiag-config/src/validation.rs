// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that values are within the ranges the engine and logging layer accept.

use crate::{BitdiagConfig, ConfigError, ConfigResult};

/// Widest row the engine can encode into a `u64` rating
pub const MAX_SUPPORTED_WIDTH: usize = 63;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    OutOfRange {
        field: String,
        value: usize,
        min: usize,
        max: usize,
    },
    InvalidValue {
        field: String,
        reason: String,
    },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{} = {} is outside valid range ({}-{})", field, value, min, max),
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - `engine.max_width` in 1-63
/// - `logging.level` is a known level
/// - `logging.retained_runs` is at least 1
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every failed check
pub fn validate_config(config: &BitdiagConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// Every validation failure in `config`, in field order
pub fn collect_errors(config: &BitdiagConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    let width = config.engine.max_width;
    if !(1..=MAX_SUPPORTED_WIDTH).contains(&width) {
        errors.push(ConfigValidationError::OutOfRange {
            field: "engine.max_width".to_string(),
            value: width,
            min: 1,
            max: MAX_SUPPORTED_WIDTH,
        });
    }

    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.logging.retained_runs == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.retained_runs".to_string(),
            reason: "must keep at least one run".to_string(),
        });
    }

    errors
}
