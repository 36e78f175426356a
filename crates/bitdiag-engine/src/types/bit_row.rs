// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-width bit rows (index 0 is the most significant bit)

use core::fmt;
use core::str::FromStr;

use super::error::DiagnosticError;

/// An immutable, ordered sequence of binary digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct BitRow {
    bits: Vec<bool>,
}

impl BitRow {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Number of bits in the row
    #[inline]
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at `column`, or `None` past the end of the row
    #[inline]
    pub fn bit(&self, column: usize) -> Option<bool> {
        self.bits.get(column).copied()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Row with every bit flipped
    pub fn complement(&self) -> Self {
        Self {
            bits: self.bits.iter().map(|b| !b).collect(),
        }
    }
}

impl From<Vec<bool>> for BitRow {
    fn from(bits: Vec<bool>) -> Self {
        Self::new(bits)
    }
}

impl FromStr for BitRow {
    type Err = DiagnosticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(position, character)| match character {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(DiagnosticError::InvalidBitCharacter {
                    position,
                    character,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bits })
    }
}

impl TryFrom<String> for BitRow {
    type Error = DiagnosticError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BitRow> for String {
    fn from(row: BitRow) -> Self {
        row.to_string()
    }
}

impl fmt::Display for BitRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
