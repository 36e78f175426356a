// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Row-index subsets used during iterative filtering

use super::bit_matrix::BitMatrix;
use super::error::{DiagnosticError, DiagnosticResult};

/// Sorted, de-duplicated set of row indices that are still "alive".
///
/// An `ActiveSet` only ever narrows: [`ActiveSet::retain_bit`] returns a subset
/// of `self`, never a superset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSet {
    indices: Vec<usize>,
}

impl ActiveSet {
    /// Every row index in `0..rows`
    pub fn all(rows: usize) -> Self {
        Self {
            indices: (0..rows).collect(),
        }
    }

    /// Explicit subset of `matrix`'s rows.
    ///
    /// # Errors
    /// `RowOutOfRange` for any index not in `0..matrix.rows()`
    pub fn from_indices<I>(indices: I, matrix: &BitMatrix) -> DiagnosticResult<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let rows = matrix.rows();
        let mut indices: Vec<usize> = indices.into_iter().collect();
        if let Some(&row) = indices.iter().find(|&&row| row >= rows) {
            return Err(DiagnosticError::RowOutOfRange { row, rows });
        }
        indices.sort_unstable();
        indices.dedup();
        Ok(Self { indices })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, row: usize) -> bool {
        self.indices.binary_search(&row).is_ok()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// The remaining row once the set has converged
    pub fn single(&self) -> Option<usize> {
        match self.indices.as_slice() {
            [row] => Some(*row),
            _ => None,
        }
    }

    /// Rows of `self` whose bit at `column` equals `bit`.
    ///
    /// `self` must come from `matrix` and `column` must already be validated
    /// against `matrix.width()`, as [`crate::column_count`] does.
    pub fn retain_bit(&self, matrix: &BitMatrix, column: usize, bit: bool) -> ActiveSet {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&row| matrix.bit(row, column) == Some(bit))
            .collect();
        ActiveSet { indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> BitMatrix {
        "00\n01\n10\n11".parse().unwrap()
    }

    #[test]
    fn test_all() {
        let set = ActiveSet::all(4);
        assert_eq!(set.indices(), &[0, 1, 2, 3]);
        assert_eq!(set.single(), None);
    }

    #[test]
    fn test_from_indices_sorts_and_dedups() {
        let set = ActiveSet::from_indices([3, 1, 3, 0], &matrix()).unwrap();
        assert_eq!(set.indices(), &[0, 1, 3]);
        assert!(set.contains(3));
        assert!(!set.contains(2));
    }

    #[test]
    fn test_from_indices_out_of_range() {
        let err = ActiveSet::from_indices([0, 4], &matrix()).unwrap_err();
        assert_eq!(err, DiagnosticError::RowOutOfRange { row: 4, rows: 4 });
    }

    #[test]
    fn test_retain_bit_is_subset() {
        let matrix = matrix();
        let set = ActiveSet::from_indices([0, 1, 3], &matrix).unwrap();
        let ones = set.retain_bit(&matrix, 0, true);
        assert_eq!(ones.indices(), &[3]);
        assert_eq!(ones.single(), Some(3));
        let zeros = set.retain_bit(&matrix, 1, false);
        assert_eq!(zeros.indices(), &[0]);
        assert!(ones.iter().all(|row| set.contains(row)));
    }
}
