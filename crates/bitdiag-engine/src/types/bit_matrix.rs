// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Rectangular, read-only bit matrix
//!
//! Rows are stored row-major in a dense `Array2<u8>` (one byte per bit, 0 or 1).
//! Nothing in the engine mutates a matrix after construction; filtering works
//! on [`ActiveSet`](super::ActiveSet) index subsets instead.

use core::str::FromStr;

use ndarray::{Array2, ArrayView1, Axis};

use super::bit_row::BitRow;
use super::error::{DiagnosticError, DiagnosticResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    bits: Array2<u8>,
}

impl BitMatrix {
    /// Build a matrix from rows that must all share the first row's width.
    ///
    /// # Errors
    /// * `EmptyInput` when `rows` is empty
    /// * `IrregularMatrix` naming the first row whose width differs
    pub fn from_rows(rows: Vec<BitRow>) -> DiagnosticResult<Self> {
        let width = rows.first().ok_or(DiagnosticError::EmptyInput)?.width();

        if let Some((row, bits)) = rows
            .iter()
            .enumerate()
            .find(|(_, bits)| bits.width() != width)
        {
            return Err(DiagnosticError::IrregularMatrix {
                row,
                expected: width,
                actual: bits.width(),
            });
        }

        let flat: Vec<u8> = rows
            .iter()
            .flat_map(|row| row.bits().iter().map(|&bit| u8::from(bit)))
            .collect();
        let bits = Array2::from_shape_vec((rows.len(), width), flat)
            .map_err(|e| DiagnosticError::InvariantViolation(e.to_string()))?;

        Ok(Self { bits })
    }

    /// Build a matrix from lines of `'0'`/`'1'` characters already held in memory.
    ///
    /// Surrounding whitespace is trimmed and blank lines are skipped, so the
    /// row index reported by `IrregularMatrix` counts non-blank lines only.
    pub fn from_lines<I, S>(lines: I) -> DiagnosticResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = lines
            .into_iter()
            .filter_map(|line| {
                let line = line.as_ref().trim();
                (!line.is_empty()).then(|| line.parse::<BitRow>())
            })
            .collect::<DiagnosticResult<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.bits.nrows()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.bits.ncols()
    }

    /// Bit at (`row`, `column`), or `None` when either index is out of range
    #[inline]
    pub fn bit(&self, row: usize, column: usize) -> Option<bool> {
        self.bits.get((row, column)).map(|&b| b == 1)
    }

    /// Copy of one row
    pub fn row(&self, row: usize) -> DiagnosticResult<BitRow> {
        if row >= self.rows() {
            return Err(DiagnosticError::RowOutOfRange {
                row,
                rows: self.rows(),
            });
        }
        Ok(BitRow::new(
            self.bits.row(row).iter().map(|&b| b == 1).collect(),
        ))
    }

    /// View of one column across every row
    pub fn column(&self, column: usize) -> DiagnosticResult<ArrayView1<'_, u8>> {
        if column >= self.width() {
            return Err(DiagnosticError::InvalidColumn {
                column,
                width: self.width(),
            });
        }
        Ok(self.bits.column(column))
    }

    /// Number of 1 bits in every column, over all rows
    pub fn ones_per_column(&self) -> Vec<usize> {
        self.bits
            .map(|&b| b as usize)
            .sum_axis(Axis(0))
            .to_vec()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = BitRow> + '_ {
        self.bits
            .rows()
            .into_iter()
            .map(|row| BitRow::new(row.iter().map(|&b| b == 1).collect()))
    }
}

impl FromStr for BitMatrix {
    type Err = DiagnosticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_lines(s.lines())
    }
}
