// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-crate debug flags
//!
//! Supports arguments like `--debug-bitdiag-engine` and `--debug-all`, the
//! `BITDIAG_DEBUG` environment variable, and the `logging.debug_crates`
//! configuration list.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Environment variable listing crates to debug (comma-separated, or `all`)
pub const DEBUG_ENV: &str = "BITDIAG_DEBUG";

/// Set of crates logged at debug level
///
/// # Example
/// ```rust
/// use bitdiag_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-bitdiag-engine".to_string()]);
/// assert!(flags.is_enabled("bitdiag-engine"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse `--debug-{crate-name}` and `--debug-all` arguments; others are ignored
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = Self::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }
        flags
    }

    /// Flags from a list of crate names; `"all"` enables every known crate
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::default();
        for name in names {
            match name.as_ref().trim() {
                "" => {}
                "all" => flags.enable_all(),
                name => flags.enable(name),
            }
        }
        flags
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string());
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Union of two flag sets
    pub fn merge(mut self, other: &CrateDebugFlags) -> Self {
        self.enabled_crates
            .extend(other.enabled_crates.iter().cloned());
        self
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    pub fn enabled_crates(&self) -> impl Iterator<Item = &str> + '_ {
        self.enabled_crates.iter().map(String::as_str)
    }

    /// `DEBUG` for enabled crates, `INFO` otherwise
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// `EnvFilter` directive string: `default_level` plus `crate=debug` per flag
    ///
    /// e.g. `"warn,bitdiag-engine=debug"`
    pub fn to_filter_string(&self, default_level: &str) -> String {
        std::iter::once(default_level.to_lowercase())
            .chain(
                self.enabled_crates
                    .iter()
                    .map(|crate_name| format!("{}=debug", crate_name)),
            )
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Debug flags from the process arguments and `BITDIAG_DEBUG`
pub fn parse_debug_flags() -> CrateDebugFlags {
    let flags = CrateDebugFlags::from_args(env::args());
    match env::var(DEBUG_ENV) {
        Ok(value) => flags.merge(&CrateDebugFlags::from_names(value.split(','))),
        Err(_) => flags,
    }
}

/// Help text for the debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  {}={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  {}=all                               Enable debug for all crates
"#,
        KNOWN_CRATES.join(", "),
        DEBUG_ENV,
        DEBUG_ENV
    )
}
