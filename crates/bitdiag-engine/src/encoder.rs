// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding between bit rows and ratings
//!
//! Bit 0 of a row is the most significant bit of the rating.

use crate::types::{BitRow, DiagnosticError, DiagnosticResult, Rating};

/// Widest row the encoder accepts
pub const MAX_ROW_WIDTH: usize = 63;

#[inline]
fn check_width(width: usize) -> DiagnosticResult<()> {
    if width > MAX_ROW_WIDTH {
        return Err(DiagnosticError::RowTooWide {
            width,
            max: MAX_ROW_WIDTH,
        });
    }
    Ok(())
}

/// Interpret `row` as an unsigned base-2 number.
///
/// # Example
/// ```
/// use bitdiag_engine::{encode_row, BitRow};
///
/// let row: BitRow = "10110".parse().unwrap();
/// assert_eq!(encode_row(&row).unwrap().value(), 22);
/// ```
pub fn encode_row(row: &BitRow) -> DiagnosticResult<Rating> {
    encode_bits(row.bits())
}

/// Same as [`encode_row`] over a raw MSB-first bit slice
pub fn encode_bits(bits: &[bool]) -> DiagnosticResult<Rating> {
    check_width(bits.len())?;
    let value = bits
        .iter()
        .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit));
    Ok(Rating(value))
}

/// Inverse of [`encode_row`]: the `width`-bit row whose value is `rating`.
///
/// # Errors
/// * `RowTooWide` if `width > MAX_ROW_WIDTH`
/// * `RatingOutOfRange` if `rating >= 2^width`
pub fn decode_rating(rating: Rating, width: usize) -> DiagnosticResult<BitRow> {
    check_width(width)?;
    if rating.value() >> width != 0 {
        return Err(DiagnosticError::RatingOutOfRange {
            rating: rating.value(),
            width,
        });
    }
    let bits = (0..width)
        .rev()
        .map(|shift| (rating.value() >> shift) & 1 == 1)
        .collect();
    Ok(BitRow::new(bits))
}
