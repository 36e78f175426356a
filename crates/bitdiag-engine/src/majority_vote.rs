// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Majority-vote (gamma/epsilon) diagnostic
//!
//! A single pass over the unfiltered matrix: the gamma row takes the most
//! common bit of every column, the epsilon row the least common one.
//! A tied column resolves to majority bit 0 (strict greater-than), so its
//! epsilon bit is 1.

use tracing::debug;

use crate::combiner::combine_ratings;
use crate::encoder::{encode_row, MAX_ROW_WIDTH};
use crate::statistics::column_counts;
use crate::types::{BitMatrix, BitRow, DiagnosticError, DiagnosticResult, Rating};

/// Result of the majority-vote pass
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerConsumption {
    pub gamma_row: BitRow,
    pub epsilon_row: BitRow,
    pub gamma: Rating,
    pub epsilon: Rating,
    /// `gamma * epsilon`
    pub product: u64,
    /// Columns where ones and zeros were equally common
    pub tied_columns: Vec<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MajorityVoteDiagnostic;

impl MajorityVoteDiagnostic {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self, matrix: &BitMatrix) -> DiagnosticResult<PowerConsumption> {
        if matrix.width() > MAX_ROW_WIDTH {
            return Err(DiagnosticError::RowTooWide {
                width: matrix.width(),
                max: MAX_ROW_WIDTH,
            });
        }

        let counts = column_counts(matrix);
        let tied_columns: Vec<usize> = counts
            .iter()
            .enumerate()
            .filter(|(_, count)| count.is_tie())
            .map(|(column, _)| column)
            .collect();

        let gamma_row = BitRow::new(counts.iter().map(|c| c.majority_bit()).collect());
        let epsilon_row = gamma_row.complement();

        let gamma = encode_row(&gamma_row)?;
        let epsilon = encode_row(&epsilon_row)?;
        let product = combine_ratings(gamma, epsilon)?;

        debug!(target: "bitdiag-engine",
            "Majority vote: gamma={} ({}) epsilon={} ({}) ties={:?}",
            gamma, gamma_row, epsilon, epsilon_row, tied_columns
        );

        Ok(PowerConsumption {
            gamma_row,
            epsilon_row,
            gamma,
            epsilon,
            product,
            tied_columns,
        })
    }
}
