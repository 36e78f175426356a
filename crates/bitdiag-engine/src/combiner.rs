// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Rating combination

use crate::types::{DiagnosticError, DiagnosticResult, Rating};

/// Product of two ratings.
///
/// # Errors
/// `RatingOverflow` if the product does not fit in `u64`
#[inline]
pub fn combine_ratings(left: Rating, right: Rating) -> DiagnosticResult<u64> {
    left.value()
        .checked_mul(right.value())
        .ok_or(DiagnosticError::RatingOverflow {
            left: left.value(),
            right: right.value(),
        })
}
