// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Binary Diagnostic Engine
//!
//! Bit-column statistics and filtering over an in-memory bit matrix:
//! - **Statistics**: per-column counts of 0s and 1s over all or active rows
//! - **Encoder**: MSB-first conversion between bit rows and ratings
//! - **Majority vote**: gamma/epsilon ratings in a single pass
//! - **Filter**: iterative keep-majority / keep-minority narrowing to one row
//! - **Combiner**: product of two ratings
//!
//! ## Example
//!
//! ```rust
//! use bitdiag_engine::{BitMatrix, DiagnosticEngine};
//!
//! let matrix: BitMatrix = "00100\n11110\n10110\n10111\n10101\n01111\n\
//!                          00111\n11100\n10000\n11001\n00010\n01010"
//!     .parse()?;
//!
//! let report = DiagnosticEngine::default().diagnose(&matrix)?;
//! assert_eq!(report.power.product, 198);
//! assert_eq!(report.life_support.product, 230);
//! # Ok::<(), bitdiag_engine::DiagnosticError>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod types;

pub mod combiner;
pub mod encoder;
pub mod engine;
pub mod filter;
pub mod majority_vote;
pub mod statistics;

pub use types::{ActiveSet, BitMatrix, BitRow, DiagnosticError, DiagnosticResult, Rating};

pub use combiner::combine_ratings;
pub use encoder::{decode_rating, encode_bits, encode_row, MAX_ROW_WIDTH};
pub use engine::{DiagnosticEngine, DiagnosticReport, EngineOptions, LifeSupportReport};
pub use filter::{FilterOutcome, FilterRun, FilterStep, IterativeBitFilter, SelectionPolicy};
pub use majority_vote::{MajorityVoteDiagnostic, PowerConsumption};
pub use statistics::{column_count, column_counts, ColumnCount, RowScope};
