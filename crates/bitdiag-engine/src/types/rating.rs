// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use core::fmt;

/// Unsigned value of a bit row read as a base-2 number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Rating(pub u64);

impl Rating {
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for Rating {
    fn from(value: u64) -> Self {
        Rating(value)
    }
}

impl From<Rating> for u64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
