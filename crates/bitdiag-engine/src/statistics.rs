// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Column statistics
//!
//! Pure counting of 0 and 1 bits in a single column, restricted either to
//! every row of the matrix or to the rows of an [`ActiveSet`].

use crate::types::{ActiveSet, BitMatrix, DiagnosticError, DiagnosticResult};

/// Which rows of the matrix a count covers
#[derive(Debug, Clone, Copy)]
pub enum RowScope<'a> {
    /// Every row of the matrix
    All,
    /// Only the rows still alive in a filter run
    Active(&'a ActiveSet),
}

impl RowScope<'_> {
    fn len(&self, matrix: &BitMatrix) -> usize {
        match self {
            RowScope::All => matrix.rows(),
            RowScope::Active(set) => set.len(),
        }
    }
}

/// Count of 1 and 0 bits in one column.
///
/// `ones + zeros` always equals the size of the scope it was counted over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnCount {
    pub ones: usize,
    pub zeros: usize,
}

impl ColumnCount {
    #[inline]
    pub fn total(&self) -> usize {
        self.ones + self.zeros
    }

    #[inline]
    pub fn is_tie(&self) -> bool {
        self.ones == self.zeros
    }

    /// Most common bit under a strict comparison: ties yield `false`
    #[inline]
    pub fn majority_bit(&self) -> bool {
        self.ones > self.zeros
    }
}

/// Count the bits of `column` over the rows in `scope`.
///
/// # Errors
/// * `InvalidColumn` if `column >= matrix.width()`
/// * `EmptyInput` if the scope contains no rows
/// * `RowOutOfRange` if the active set names a row the matrix does not have
pub fn column_count(
    matrix: &BitMatrix,
    scope: RowScope<'_>,
    column: usize,
) -> DiagnosticResult<ColumnCount> {
    let bits = matrix.column(column)?;
    let total = scope.len(matrix);
    if total == 0 {
        return Err(DiagnosticError::EmptyInput);
    }

    let ones = match scope {
        RowScope::All => bits.iter().filter(|&&b| b == 1).count(),
        RowScope::Active(set) => {
            let rows = matrix.rows();
            let in_range = set.indices().partition_point(|&row| row < rows);
            if let Some(&row) = set.indices().get(in_range) {
                return Err(DiagnosticError::RowOutOfRange { row, rows });
            }
            set.iter()
                .filter(|&row| bits.get(row) == Some(&1))
                .count()
        }
    };

    Ok(ColumnCount {
        ones,
        zeros: total - ones,
    })
}

/// Counts for every column over all rows, computed in a single reduction
pub fn column_counts(matrix: &BitMatrix) -> Vec<ColumnCount> {
    let rows = matrix.rows();
    matrix
        .ones_per_column()
        .into_iter()
        .map(|ones| ColumnCount {
            ones,
            zeros: rows - ones,
        })
        .collect()
}
