// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. Key/value overrides from the embedding application
//!
//! The merged result is validated before it is returned.

use crate::{validate_config, BitdiagConfig, ConfigError, ConfigResult, CONFIG_FILE_NAME};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable holding an explicit config file path
pub const CONFIG_PATH_ENV: &str = "BITDIAG_CONFIG_PATH";

/// Environment variables and the override keys they map to
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("BITDIAG_MAX_WIDTH", "max_width"),
    ("BITDIAG_PARALLEL_FILTERS", "parallel_filters"),
    ("BITDIAG_CHECK_INVARIANTS", "check_invariants"),
    ("BITDIAG_RECORD_TRACE", "record_trace"),
    ("BITDIAG_LOG_LEVEL", "log_level"),
    ("BITDIAG_LOG_FORMAT", "log_format"),
    ("BITDIAG_LOG_DIR", "log_dir"),
    ("BITDIAG_DEBUG_CRATES", "debug_crates"),
];

/// Find the configuration file
///
/// Search order:
/// 1. `BITDIAG_CONFIG_PATH` environment variable
/// 2. Current working directory: `./bitdiag.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        search_paths.extend(cwd.ancestors().skip(1).take(5).map(|p| p.join(CONFIG_FILE_NAME)));
    }

    if let Some(path) = search_paths.iter().find(|p| p.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, the file is searched for.
/// * `overrides` - Optional key/value overrides applied after environment variables
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    overrides: Option<&HashMap<String, String>>,
) -> ConfigResult<BitdiagConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };
    debug!(target: "bitdiag-config", "Loading configuration from {}", config_file.display());

    let content = fs::read_to_string(&config_file)?;
    let mut config: BitdiagConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(overrides) = overrides {
        apply_overrides(&mut config, overrides);
    }

    validate_config(&config)?;
    Ok(config)
}

/// Parse and validate configuration held in memory. No overrides are applied.
pub fn load_config_from_str(content: &str) -> ConfigResult<BitdiagConfig> {
    let config: BitdiagConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `BITDIAG_MAX_WIDTH` -> `engine.max_width`
/// - `BITDIAG_PARALLEL_FILTERS` -> `engine.parallel_filters`
/// - `BITDIAG_CHECK_INVARIANTS` -> `engine.check_invariants`
/// - `BITDIAG_RECORD_TRACE` -> `engine.record_trace`
/// - `BITDIAG_LOG_LEVEL` -> `logging.level`
/// - `BITDIAG_LOG_FORMAT` -> `logging.format`
/// - `BITDIAG_LOG_DIR` -> `logging.log_dir`
/// - `BITDIAG_DEBUG_CRATES` -> `logging.debug_crates` (comma-separated)
pub fn apply_environment_overrides(config: &mut BitdiagConfig) {
    apply_environment_with(config, |name| env::var(name).ok());
}

fn apply_environment_with<F>(config: &mut BitdiagConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for (variable, key) in ENV_OVERRIDES {
        if let Some(value) = lookup(variable) {
            if let Err(reason) = apply_key(config, key, &value) {
                warn!(target: "bitdiag-config", "Ignoring {}={:?}: {}", variable, value, reason);
            }
        }
    }
}

/// Apply key/value overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `overrides` - e.g. `{"max_width": "12", "parallel_filters": "false"}`
///
/// Unknown keys and unparsable values are logged and skipped.
pub fn apply_overrides(config: &mut BitdiagConfig, overrides: &HashMap<String, String>) {
    for (key, value) in overrides {
        if let Err(reason) = apply_key(config, key, value) {
            warn!(target: "bitdiag-config", "Ignoring override {}={:?}: {}", key, value, reason);
        }
    }
}

fn apply_key(config: &mut BitdiagConfig, key: &str, value: &str) -> Result<(), String> {
    match key {
        "max_width" => {
            config.engine.max_width = value
                .parse()
                .map_err(|e| format!("not a width: {}", e))?;
        }
        "parallel_filters" => config.engine.parallel_filters = parse_bool(value)?,
        "check_invariants" => config.engine.check_invariants = parse_bool(value)?,
        "record_trace" => config.engine.record_trace = parse_bool(value)?,
        "log_level" => config.logging.level = value.to_string(),
        "log_format" => config.logging.format = value.parse()?,
        "log_dir" => config.logging.log_dir = Some(PathBuf::from(value)),
        "debug_crates" => {
            config.logging.debug_crates = value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();
        }
        _ => return Err("unknown key".to_string()),
    }
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(format!("not a boolean: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogFormat;

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BITDIAG_MAX_WIDTH", "12"),
            ("BITDIAG_PARALLEL_FILTERS", "no"),
            ("BITDIAG_LOG_FORMAT", "JSON"),
            ("BITDIAG_DEBUG_CRATES", "bitdiag-engine, bitdiag-config"),
        ]
        .into_iter()
        .collect();

        let mut config = BitdiagConfig::default();
        apply_environment_with(&mut config, |name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.engine.max_width, 12);
        assert!(!config.engine.parallel_filters);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.logging.debug_crates,
            vec!["bitdiag-engine".to_string(), "bitdiag-config".to_string()]
        );
    }

    #[test]
    fn test_malformed_values_are_ignored() {
        let mut overrides = HashMap::new();
        overrides.insert("max_width".to_string(), "wide".to_string());
        overrides.insert("record_trace".to_string(), "maybe".to_string());
        overrides.insert("unknown".to_string(), "1".to_string());
        overrides.insert("check_invariants".to_string(), "0".to_string());

        let mut config = BitdiagConfig::default();
        apply_overrides(&mut config, &overrides);

        assert_eq!(config.engine.max_width, 63);
        assert!(config.engine.record_trace);
        assert!(!config.engine.check_invariants);
    }

    #[test]
    fn test_load_config_from_str_partial_sections() {
        let config = load_config_from_str(
            r#"
            [engine]
            max_width = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.max_width, 12);
        assert!(config.engine.parallel_filters);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_config_from_str_rejects_invalid() {
        let err = load_config_from_str("[engine]\nmax_width = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
