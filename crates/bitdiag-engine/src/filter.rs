// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Iterative bit-criteria filter
//!
//! Narrows an [`ActiveSet`] column by column until exactly one row remains.
//! Column `c` is consumed on iteration `c`; the counts for each column are
//! recomputed over the rows that are still active.
//!
//! The two policies differ only in which bit value they retain:
//!
//! | counts           | KeepMajority | KeepMinority |
//! |------------------|--------------|--------------|
//! | `ones >= zeros`  | keep 1-rows  | keep 0-rows  |
//! | `ones <  zeros`  | keep 0-rows  | keep 1-rows  |
//!
//! Both stop as soon as one row remains, before consuming another column.

use core::fmt;

use tracing::{debug, warn};

use crate::encoder::{encode_row, MAX_ROW_WIDTH};
use crate::statistics::{column_count, ColumnCount, RowScope};
use crate::types::{ActiveSet, BitMatrix, BitRow, DiagnosticError, DiagnosticResult, Rating};

/// Which bit value survives a filtering step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelectionPolicy {
    /// Oxygen generator rating: most common bit, ties keep 1
    KeepMajority,
    /// CO2 scrubber rating: least common bit, ties keep 0
    KeepMinority,
}

impl SelectionPolicy {
    /// Bit value retained for a column with the given counts
    #[inline]
    pub fn retained_bit(self, count: ColumnCount) -> bool {
        let ones_win = count.ones >= count.zeros;
        match self {
            SelectionPolicy::KeepMajority => ones_win,
            SelectionPolicy::KeepMinority => !ones_win,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SelectionPolicy::KeepMajority => "keep-majority",
            SelectionPolicy::KeepMinority => "keep-minority",
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One consumed column of a filter run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterStep {
    pub column: usize,
    /// Counts over the active rows before this step
    pub count: ColumnCount,
    pub retained_bit: bool,
    /// Active rows after this step
    pub remaining: usize,
    /// No active row carried `retained_bit`, so the set was left as it was
    pub kept_unchanged: bool,
}

/// Converged result of a filter run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterOutcome {
    pub policy: SelectionPolicy,
    pub row_index: usize,
    pub row: BitRow,
    pub rating: Rating,
    pub columns_consumed: usize,
    /// Empty unless tracing was requested
    pub trace: Vec<FilterStep>,
}

/// Explicit state of one filter invocation: the active rows and the next column.
///
/// ```
/// use bitdiag_engine::{BitMatrix, FilterRun, SelectionPolicy};
///
/// let matrix: BitMatrix = "00\n01\n11".parse().unwrap();
/// let mut run = FilterRun::new(&matrix, SelectionPolicy::KeepMajority);
/// while let Some(step) = run.step().unwrap() {
///     assert!(step.count.total() >= step.remaining);
/// }
/// assert_eq!(run.active().single(), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct FilterRun<'m> {
    matrix: &'m BitMatrix,
    policy: SelectionPolicy,
    active: ActiveSet,
    column: usize,
    check_invariants: bool,
}

impl<'m> FilterRun<'m> {
    pub fn new(matrix: &'m BitMatrix, policy: SelectionPolicy) -> Self {
        Self {
            matrix,
            policy,
            active: ActiveSet::all(matrix.rows()),
            column: 0,
            check_invariants: true,
        }
    }

    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    /// Next column to be consumed
    pub fn column(&self) -> usize {
        self.column
    }

    #[inline]
    pub fn is_converged(&self) -> bool {
        self.active.len() == 1
    }

    /// Consume the next column.
    ///
    /// Returns `Ok(None)` without consuming anything once a single row remains.
    ///
    /// # Errors
    /// * `ColumnExhausted` if more than one row remains but every column was used
    /// * `InvariantViolation` if invariant checks are enabled and a count or
    ///   set size is inconsistent
    pub fn step(&mut self) -> DiagnosticResult<Option<FilterStep>> {
        if self.is_converged() {
            return Ok(None);
        }

        let width = self.matrix.width();
        if self.column >= width {
            return Err(DiagnosticError::ColumnExhausted {
                column: self.column,
                width,
            });
        }

        let column = self.column;
        let before = self.active.len();
        let count = column_count(self.matrix, RowScope::Active(&self.active), column)?;
        if self.check_invariants && count.total() != before {
            return Err(DiagnosticError::InvariantViolation(format!(
                "column {} counted {} rows but {} are active",
                column,
                count.total(),
                before
            )));
        }

        let retained_bit = self.policy.retained_bit(count);
        let retained = self.active.retain_bit(self.matrix, column, retained_bit);

        let kept_unchanged = retained.is_empty();
        if kept_unchanged {
            warn!(target: "bitdiag-engine",
                "{} filter: no active row has bit {} at column {}, keeping {} rows",
                self.policy, u8::from(retained_bit), column, before
            );
        } else {
            if self.check_invariants && retained.len() > before {
                return Err(DiagnosticError::InvariantViolation(format!(
                    "active set grew from {} to {} rows at column {}",
                    before,
                    retained.len(),
                    column
                )));
            }
            self.active = retained;
        }
        self.column += 1;

        debug!(target: "bitdiag-engine",
            "{} filter column {}: ones={} zeros={} keep={} remaining={}",
            self.policy, column, count.ones, count.zeros, u8::from(retained_bit), self.active.len()
        );

        Ok(Some(FilterStep {
            column,
            count,
            retained_bit,
            remaining: self.active.len(),
            kept_unchanged,
        }))
    }
}

/// Runs a [`FilterRun`] to convergence and encodes the surviving row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterativeBitFilter {
    policy: SelectionPolicy,
    check_invariants: bool,
    record_trace: bool,
}

impl IterativeBitFilter {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            policy,
            check_invariants: true,
            record_trace: true,
        }
    }

    /// Oxygen generator rating filter
    pub fn keep_majority() -> Self {
        Self::new(SelectionPolicy::KeepMajority)
    }

    /// CO2 scrubber rating filter
    pub fn keep_minority() -> Self {
        Self::new(SelectionPolicy::KeepMinority)
    }

    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.record_trace = enabled;
        self
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Filter `matrix` down to one row.
    ///
    /// # Errors
    /// * `RowTooWide` if the surviving row could not be encoded
    /// * `FilterDidNotConverge` if columns ran out with several rows left
    pub fn run(&self, matrix: &BitMatrix) -> DiagnosticResult<FilterOutcome> {
        let width = matrix.width();
        if width > MAX_ROW_WIDTH {
            return Err(DiagnosticError::RowTooWide {
                width,
                max: MAX_ROW_WIDTH,
            });
        }

        let mut run =
            FilterRun::new(matrix, self.policy).with_invariant_checks(self.check_invariants);
        let mut trace = Vec::new();

        loop {
            match run.step() {
                Ok(Some(step)) => {
                    if self.record_trace {
                        trace.push(step);
                    }
                }
                Ok(None) => break,
                Err(DiagnosticError::ColumnExhausted { .. }) => {
                    return Err(DiagnosticError::FilterDidNotConverge {
                        policy: self.policy,
                        remaining: run.active().len(),
                        width,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let row_index = run.active().single().ok_or_else(|| {
            DiagnosticError::InvariantViolation(format!(
                "{} filter stopped with {} active rows",
                self.policy,
                run.active().len()
            ))
        })?;
        let row = matrix.row(row_index)?;
        let rating = encode_row(&row)?;

        debug!(target: "bitdiag-engine",
            "{} filter converged on row {} ({}) = {} after {} columns",
            self.policy, row_index, row, rating, run.column()
        );

        Ok(FilterOutcome {
            policy: self.policy,
            row_index,
            row,
            rating,
            columns_consumed: run.column(),
            trace,
        })
    }
}
