// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for diagnostic operations

use crate::filter::SelectionPolicy;

/// Errors raised by the diagnostic engine.
///
/// Every operation is a deterministic function over in-memory data, so none of
/// these are transient. They are returned to the immediate caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticError {
    #[error("Column {column} is outside the matrix width {width}")]
    InvalidColumn { column: usize, width: usize },

    #[error("Operation requires at least one row")]
    EmptyInput,

    #[error("Row width {width} exceeds the encodable maximum of {max} bits")]
    RowTooWide { width: usize, max: usize },

    #[error("Row {row} has width {actual}, expected {expected}")]
    IrregularMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("No column left to consume: column {column} of width {width}")]
    ColumnExhausted { column: usize, width: usize },

    #[error("{policy} filter did not converge: {remaining} rows remain after all {width} columns")]
    FilterDidNotConverge {
        policy: SelectionPolicy,
        remaining: usize,
        width: usize,
    },

    #[error("Invalid bit character {character:?} at position {position}")]
    InvalidBitCharacter { position: usize, character: char },

    #[error("Row index {row} is out of range for a matrix of {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("Rating {rating} does not fit in {width} bits")]
    RatingOutOfRange { rating: u64, width: usize },

    #[error("Rating product {left} x {right} overflows u64")]
    RatingOverflow { left: u64, right: u64 },

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for diagnostic operations
pub type DiagnosticResult<T> = Result<T, DiagnosticError>;
