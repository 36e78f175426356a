// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Diagnostic session
//!
//! Wires configuration, logging and the engine together:
//! ```text
//! bitdiag.toml + env + overrides → BitdiagConfig
//!     ├── logging  → init_logging (optional, once per process)
//!     └── engine   → DiagnosticEngine → DiagnosticReport
//! ```

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::config::{self, BitdiagConfig};
use crate::engine::{BitMatrix, DiagnosticEngine, DiagnosticReport};
use crate::observability::{self, CrateDebugFlags, LoggingGuard};
use crate::{BitdiagError, BitdiagResult};

/// Configured engine plus the logging settings it was loaded with
#[derive(Debug, Clone)]
pub struct DiagnosticSession {
    config: BitdiagConfig,
    engine: DiagnosticEngine,
    debug_flags: CrateDebugFlags,
}

impl DiagnosticSession {
    /// Session from an already validated configuration
    pub fn from_config(config: BitdiagConfig) -> Self {
        let engine = DiagnosticEngine::from_config(&config.engine);
        let debug_flags = CrateDebugFlags::from_names(&config.logging.debug_crates);
        Self {
            config,
            engine,
            debug_flags,
        }
    }

    /// Load `bitdiag.toml` (searched for when `path` is `None`) and build a session
    ///
    /// # Errors
    /// Returns the loader's error if the file is missing, malformed or invalid.
    pub fn load(
        path: Option<&Path>,
        overrides: Option<&HashMap<String, String>>,
    ) -> BitdiagResult<Self> {
        let config = config::load_config(path, overrides)?;
        Ok(Self::from_config(config))
    }

    /// Session from TOML held in memory
    pub fn from_toml(content: &str) -> BitdiagResult<Self> {
        Ok(Self::from_config(config::load_config_from_str(content)?))
    }

    /// Add debug flags from another source, e.g. [`observability::parse_debug_flags`]
    pub fn with_debug_flags(mut self, flags: &CrateDebugFlags) -> Self {
        self.debug_flags = self.debug_flags.merge(flags);
        self
    }

    pub fn config(&self) -> &BitdiagConfig {
        &self.config
    }

    pub fn engine(&self) -> &DiagnosticEngine {
        &self.engine
    }

    pub fn debug_flags(&self) -> &CrateDebugFlags {
        &self.debug_flags
    }

    /// Install the global tracing subscriber from the logging configuration.
    ///
    /// Keep the returned guard alive for the rest of the process.
    pub fn init_logging(&self) -> BitdiagResult<LoggingGuard> {
        let guard = observability::init_logging(&self.config.logging, &self.debug_flags)
            .map_err(|e| BitdiagError::Logging(format!("{:#}", e)))?;
        info!(target: "bitdiag",
            "Logging initialized (level={}, debug={:?})",
            self.config.logging.level,
            self.debug_flags.enabled_crates().collect::<Vec<_>>()
        );
        Ok(guard)
    }

    pub fn diagnose(&self, matrix: &BitMatrix) -> BitdiagResult<DiagnosticReport> {
        Ok(self.engine.diagnose(matrix)?)
    }

    /// Build the matrix from `'0'`/`'1'` lines and diagnose it
    pub fn diagnose_lines<I, S>(&self, lines: I) -> BitdiagResult<DiagnosticReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matrix = BitMatrix::from_lines(lines)?;
        debug!(target: "bitdiag",
            "Parsed {}x{} matrix", matrix.rows(), matrix.width()
        );
        self.diagnose(&matrix)
    }
}

impl Default for DiagnosticSession {
    fn default() -> Self {
        Self::from_config(BitdiagConfig::default())
    }
}
