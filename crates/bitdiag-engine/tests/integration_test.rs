// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for bitdiag-engine
//!
//! These tests run the full diagnostic pipeline on the reference report and
//! check the invariants that hold across components.

use bitdiag_engine::*;

const REFERENCE_REPORT: [&str; 12] = [
    "00100", "11110", "10110", "10111", "10101", "01111", "00111", "11100", "10000", "11001",
    "00010", "01010",
];

fn reference_matrix() -> BitMatrix {
    BitMatrix::from_lines(REFERENCE_REPORT).unwrap()
}

#[test]
fn test_majority_vote_reference_report() {
    let result = MajorityVoteDiagnostic::new().run(&reference_matrix()).unwrap();

    assert_eq!(result.gamma_row.to_string(), "10110");
    assert_eq!(result.epsilon_row.to_string(), "01001");
    assert_eq!(result.gamma, Rating(22));
    assert_eq!(result.epsilon, Rating(9));
    assert_eq!(result.product, 198);
    assert!(result.tied_columns.is_empty());
}

#[test]
fn test_iterative_filters_reference_report() {
    let matrix = reference_matrix();

    let oxygen = IterativeBitFilter::keep_majority().run(&matrix).unwrap();
    assert_eq!(oxygen.row.to_string(), "10111");
    assert_eq!(oxygen.row_index, 3);
    assert_eq!(oxygen.rating, Rating(23));
    assert_eq!(oxygen.columns_consumed, 5);

    let co2 = IterativeBitFilter::keep_minority().run(&matrix).unwrap();
    assert_eq!(co2.row.to_string(), "01010");
    assert_eq!(co2.row_index, 11);
    assert_eq!(co2.rating, Rating(10));
    assert_eq!(co2.columns_consumed, 3);

    assert_eq!(combine_ratings(oxygen.rating, co2.rating).unwrap(), 230);
}

#[test]
fn test_oxygen_trace_reference_report() {
    let oxygen = IterativeBitFilter::keep_majority()
        .run(&reference_matrix())
        .unwrap();

    let remaining: Vec<usize> = oxygen.trace.iter().map(|s| s.remaining).collect();
    assert_eq!(remaining, vec![7, 4, 3, 2, 1]);

    // Final column ties 1/1 and keeps the 1-row
    let last = oxygen.trace.last().unwrap();
    assert!(last.count.is_tie());
    assert!(last.retained_bit);
}

#[test]
fn test_engine_report_reference_report() {
    let report = DiagnosticEngine::default()
        .diagnose(&reference_matrix())
        .unwrap();

    assert_eq!(report.rows, 12);
    assert_eq!(report.width, 5);
    assert_eq!(report.power.product, 198);
    assert_eq!(report.life_support.oxygen.rating, Rating(23));
    assert_eq!(report.life_support.co2.rating, Rating(10));
    assert_eq!(report.life_support.product, 230);
}

#[test]
fn test_keep_majority_ties_every_step() {
    // Every column splits the active rows evenly.
    let matrix = BitMatrix::from_lines(["000", "001", "010", "011", "100", "101", "110", "111"])
        .unwrap();

    let oxygen = IterativeBitFilter::keep_majority().run(&matrix).unwrap();
    assert!(oxygen.trace.iter().all(|step| step.count.is_tie()));
    assert!(oxygen.trace.iter().all(|step| step.retained_bit));
    assert_eq!(oxygen.row.to_string(), "111");

    let co2 = IterativeBitFilter::keep_minority().run(&matrix).unwrap();
    assert!(co2.trace.iter().all(|step| !step.retained_bit));
    assert_eq!(co2.row.to_string(), "000");
}

#[test]
fn test_irregular_matrix_fails_before_filtering() {
    let err = BitMatrix::from_lines(["10110", "1011", "00000"]).unwrap_err();
    assert_eq!(
        err,
        DiagnosticError::IrregularMatrix {
            row: 1,
            expected: 5,
            actual: 4
        }
    );
}

#[test]
fn test_gamma_and_epsilon_are_complements() {
    let matrices = [
        reference_matrix(),
        BitMatrix::from_lines(["1100", "1010", "0110", "0001"]).unwrap(),
        BitMatrix::from_lines(["1", "0"]).unwrap(),
    ];

    for matrix in &matrices {
        let result = MajorityVoteDiagnostic::new().run(matrix).unwrap();
        for column in 0..matrix.width() {
            assert_ne!(result.gamma_row.bit(column), result.epsilon_row.bit(column));
        }
        let mask = (1u64 << matrix.width()) - 1;
        assert_eq!(result.gamma.value() ^ mask, result.epsilon.value());
    }
}

#[test]
fn test_filters_converge_within_width_on_distinct_rows() {
    let width = 4;
    // Every 4-bit row except a few, so counts are uneven at several steps
    let lines: Vec<String> = (0u64..16)
        .filter(|v| ![3, 6, 9, 12].contains(v))
        .map(|v| decode_rating(Rating(v), width).unwrap().to_string())
        .collect();
    let matrix = BitMatrix::from_lines(&lines).unwrap();

    for policy in [SelectionPolicy::KeepMajority, SelectionPolicy::KeepMinority] {
        let mut run = FilterRun::new(&matrix, policy);
        let mut steps = 0;
        while let Some(step) = run.step().unwrap() {
            steps += 1;
            assert!(steps <= width);
            assert!(step.remaining <= step.count.total());
            assert!(step.remaining >= 1);
        }
        assert!(run.is_converged());
    }
}

#[test]
fn test_counts_sum_to_active_size_every_step() {
    let matrix = reference_matrix();
    for policy in [SelectionPolicy::KeepMajority, SelectionPolicy::KeepMinority] {
        let mut run = FilterRun::new(&matrix, policy);
        loop {
            let active_before = run.active().len();
            let column = run.column();
            match run.step().unwrap() {
                Some(step) => {
                    assert_eq!(step.column, column);
                    assert_eq!(step.count.ones + step.count.zeros, active_before);
                }
                None => break,
            }
        }
    }
}

#[test]
fn test_active_set_never_grows() {
    let matrix = reference_matrix();
    let mut run = FilterRun::new(&matrix, SelectionPolicy::KeepMinority);
    let mut previous = run.active().clone();
    while run.step().unwrap().is_some() {
        let current = run.active();
        assert!(current.len() <= previous.len());
        assert!(current.iter().all(|row| previous.contains(row)));
        previous = current.clone();
    }
}

#[test]
fn test_parallel_and_sequential_engines_agree() {
    let matrix = reference_matrix();
    let parallel = DiagnosticEngine::new(EngineOptions {
        parallel_filters: true,
        ..EngineOptions::default()
    });
    let sequential = DiagnosticEngine::new(EngineOptions {
        parallel_filters: false,
        ..EngineOptions::default()
    });

    assert_eq!(
        parallel.diagnose(&matrix).unwrap(),
        sequential.diagnose(&matrix).unwrap()
    );
}

#[test]
fn test_column_statistics_over_filtered_rows() {
    let matrix = reference_matrix();
    let active = ActiveSet::all(matrix.rows()).retain_bit(&matrix, 0, true);
    assert_eq!(active.len(), 7);

    let first = column_count(&matrix, RowScope::Active(&active), 1).unwrap();
    let again = column_count(&matrix, RowScope::Active(&active), 1).unwrap();
    assert_eq!(first, ColumnCount { ones: 3, zeros: 4 });
    assert_eq!(first, again);
}

#[cfg(feature = "serde")]
#[test]
fn test_report_serializes_to_json() {
    let report = DiagnosticEngine::default()
        .diagnose(&reference_matrix())
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["power"]["gamma"], 22);
    assert_eq!(json["power"]["gamma_row"], "10110");
    assert_eq!(json["life_support"]["oxygen"]["policy"], "keep_majority");
    assert_eq!(json["life_support"]["co2"]["row"], "01010");

    let back: DiagnosticReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}
