// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Diagnostic engine
//!
//! Composes the majority-vote pass and the two iterative filters into a single
//! report. The oxygen (keep-majority) and CO2 (keep-minority) filters each own
//! their active set and only read the matrix, so they can run on separate
//! rayon workers.

use std::time::Instant;

use bitdiag_config::EngineConfig;
use tracing::{debug, info};

use crate::combiner::combine_ratings;
use crate::encoder::MAX_ROW_WIDTH;
use crate::filter::{FilterOutcome, IterativeBitFilter};
use crate::majority_vote::{MajorityVoteDiagnostic, PowerConsumption};
use crate::types::{BitMatrix, DiagnosticError, DiagnosticResult};

/// Runtime options for [`DiagnosticEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Widest matrix accepted (capped at `MAX_ROW_WIDTH`)
    pub max_width: usize,
    /// Run the two filters concurrently
    pub parallel_filters: bool,
    pub check_invariants: bool,
    /// Keep per-column filter steps in the report
    pub record_trace: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_width: MAX_ROW_WIDTH,
            parallel_filters: true,
            check_invariants: true,
            record_trace: true,
        }
    }
}

impl From<&EngineConfig> for EngineOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            max_width: config.max_width,
            parallel_filters: config.parallel_filters,
            check_invariants: config.check_invariants,
            record_trace: config.record_trace,
        }
    }
}

/// Oxygen generator and CO2 scrubber ratings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LifeSupportReport {
    pub oxygen: FilterOutcome,
    pub co2: FilterOutcome,
    /// `oxygen.rating * co2.rating`
    pub product: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagnosticReport {
    pub rows: usize,
    pub width: usize,
    pub power: PowerConsumption,
    pub life_support: LifeSupportReport,
}

#[derive(Debug, Clone, Default)]
pub struct DiagnosticEngine {
    options: EngineOptions,
}

impl DiagnosticEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(EngineOptions::from(config))
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    fn check_width(&self, matrix: &BitMatrix) -> DiagnosticResult<()> {
        let max = self.options.max_width.min(MAX_ROW_WIDTH);
        if matrix.width() > max {
            return Err(DiagnosticError::RowTooWide {
                width: matrix.width(),
                max,
            });
        }
        Ok(())
    }

    fn filter(&self, filter: IterativeBitFilter) -> IterativeBitFilter {
        filter
            .with_invariant_checks(self.options.check_invariants)
            .with_trace(self.options.record_trace)
    }

    /// Gamma/epsilon ratings over the whole matrix
    pub fn power_consumption(&self, matrix: &BitMatrix) -> DiagnosticResult<PowerConsumption> {
        self.check_width(matrix)?;
        MajorityVoteDiagnostic::new().run(matrix)
    }

    /// Oxygen and CO2 ratings from the two iterative filters
    pub fn life_support(&self, matrix: &BitMatrix) -> DiagnosticResult<LifeSupportReport> {
        self.check_width(matrix)?;

        let oxygen_filter = self.filter(IterativeBitFilter::keep_majority());
        let co2_filter = self.filter(IterativeBitFilter::keep_minority());

        let (oxygen, co2) = if self.options.parallel_filters {
            rayon::join(|| oxygen_filter.run(matrix), || co2_filter.run(matrix))
        } else {
            (oxygen_filter.run(matrix), co2_filter.run(matrix))
        };
        let oxygen = oxygen?;
        let co2 = co2?;

        let product = combine_ratings(oxygen.rating, co2.rating)?;
        debug!(target: "bitdiag-engine",
            "Life support: oxygen={} co2={} product={}",
            oxygen.rating, co2.rating, product
        );

        Ok(LifeSupportReport {
            oxygen,
            co2,
            product,
        })
    }

    /// Both diagnostics for one matrix
    pub fn diagnose(&self, matrix: &BitMatrix) -> DiagnosticResult<DiagnosticReport> {
        let start = Instant::now();

        let power = self.power_consumption(matrix)?;
        let life_support = self.life_support(matrix)?;

        info!(target: "bitdiag-engine",
            "Diagnosed {}x{} matrix in {:?}: power={} life_support={}",
            matrix.rows(), matrix.width(), start.elapsed(), power.product, life_support.product
        );

        Ok(DiagnosticReport {
            rows: matrix.rows(),
            width: matrix.width(),
            power,
            life_support,
        })
    }
}
