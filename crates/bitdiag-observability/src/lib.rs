// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # bitdiag-observability
//!
//! Logging setup shared by the bitdiag crates, with per-crate debug flag
//! support.
//!
//! ## Features
//! - `file-logging`: per-run rolling JSON log files

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Crate names accepted by the debug flags (also their tracing targets)
pub const KNOWN_CRATES: &[&str] = &[
    "bitdiag",
    "bitdiag-engine",
    "bitdiag-config",
    "bitdiag-observability",
];
