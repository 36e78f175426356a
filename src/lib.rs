// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # bitdiag - Binary Diagnostic Engine
//!
//! Bit-column statistics and iterative bit-criteria filtering over an
//! in-memory bit matrix. This crate ties the member crates together; each of
//! them is usable on its own.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! bitdiag = "0.1"
//! ```
//!
//! ```rust
//! use bitdiag::prelude::*;
//!
//! let session = DiagnosticSession::from_config(BitdiagConfig::default());
//! let report = session.diagnose_lines([
//!     "00100", "11110", "10110", "10111", "10101", "01111",
//!     "00111", "11100", "10000", "11001", "00010", "01010",
//! ])?;
//!
//! assert_eq!(report.power.product, 198);
//! assert_eq!(report.life_support.product, 230);
//! # Ok::<(), bitdiag::BitdiagError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - **`serde`** (default): serialisable reports
//! - **`file-logging`**: per-run rolling JSON log files
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: bitdiag-config, bitdiag-observability      │
//! │  (TOML + overrides, tracing subscriber, debug flags)    │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Algorithms: bitdiag-engine                             │
//! │  (column statistics, majority vote, iterative filter)   │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Session: bitdiag::DiagnosticSession                    │
//! │  (config → logging → engine)                            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export members
pub use bitdiag_config as config;
pub use bitdiag_engine as engine;
pub use bitdiag_observability as observability;

pub mod session;

pub use session::DiagnosticSession;

/// Errors surfaced by the umbrella crate
#[derive(Debug, thiserror::Error)]
pub enum BitdiagError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Diagnostic(#[from] engine::DiagnosticError),

    #[error("Logging initialization failed: {0}")]
    Logging(String),
}

pub type BitdiagResult<T> = Result<T, BitdiagError>;

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::engine::{
        combine_ratings, encode_row, ActiveSet, BitMatrix, BitRow, ColumnCount, DiagnosticEngine,
        DiagnosticError, DiagnosticReport, EngineOptions, FilterOutcome, IterativeBitFilter,
        MajorityVoteDiagnostic, PowerConsumption, Rating, RowScope, SelectionPolicy,
    };

    pub use crate::config::{load_config, BitdiagConfig, EngineConfig, LoggingConfig};

    pub use crate::observability::CrateDebugFlags;

    pub use crate::{BitdiagError, BitdiagResult, DiagnosticSession};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let row: BitRow = "101".parse().unwrap();
        assert_eq!(encode_row(&row).unwrap(), Rating(5));
    }

    #[test]
    fn test_errors_convert() {
        let err: crate::BitdiagError = crate::engine::DiagnosticError::EmptyInput.into();
        assert!(matches!(err, crate::BitdiagError::Diagnostic(_)));
    }
}
