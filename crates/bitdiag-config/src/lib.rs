// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # bitdiag Configuration System
//!
//! Type-safe configuration loader for the diagnostic engine with support for:
//! - TOML file parsing
//! - Environment variable overrides
//! - Key/value overrides supplied by the embedding application
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitdiag_config::load_config;
//!
//! let config = load_config(None, None).expect("Failed to load config");
//! println!("Max width: {}", config.engine.max_width);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name searched for by [`find_config_file`]
pub const CONFIG_FILE_NAME: &str = "bitdiag.toml";

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{
    apply_environment_overrides, apply_overrides, find_config_file, load_config,
    load_config_from_str,
};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
