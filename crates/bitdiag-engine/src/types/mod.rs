// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Diagnostic Types Module
//!
//! Data model shared by every diagnostic component: rows, matrices, active
//! row subsets, ratings and the error taxonomy.

pub mod active_set;
pub mod bit_matrix;
pub mod bit_row;
pub mod error;
pub mod rating;

pub use active_set::ActiveSet;
pub use bit_matrix::BitMatrix;
pub use bit_row::BitRow;
pub use error::{DiagnosticError, DiagnosticResult};
pub use rating::Rating;
