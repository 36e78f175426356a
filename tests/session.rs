// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests: configuration → session → report

use std::collections::HashMap;

use bitdiag::prelude::*;

const DIAGNOSTIC_LINES: [&str; 12] = [
    "00100", "11110", "10110", "10111", "10101", "01111", "00111", "11100", "10000", "11001",
    "00010", "01010",
];

#[test]
fn test_session_from_file_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bitdiag.toml");
    std::fs::write(
        &path,
        r#"
        [engine]
        max_width = 12
        parallel_filters = true

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    let overrides = HashMap::from([("parallel_filters".to_string(), "false".to_string())]);
    let session = DiagnosticSession::load(Some(&path), Some(&overrides)).unwrap();
    assert!(!session.engine().options().parallel_filters);

    let report = session.diagnose_lines(DIAGNOSTIC_LINES).unwrap();
    assert_eq!(report.rows, 12);
    assert_eq!(report.width, 5);
    assert_eq!(report.power.gamma, Rating(22));
    assert_eq!(report.power.epsilon, Rating(9));
    assert_eq!(report.power.product, 198);
    assert_eq!(report.life_support.oxygen.rating, Rating(23));
    assert_eq!(report.life_support.co2.rating, Rating(10));
    assert_eq!(report.life_support.product, 230);
}

#[test]
fn test_configured_width_limit_applies() {
    let session = DiagnosticSession::from_toml("[engine]\nmax_width = 4\n").unwrap();
    let err = session.diagnose_lines(DIAGNOSTIC_LINES).unwrap_err();
    assert!(matches!(
        err,
        BitdiagError::Diagnostic(DiagnosticError::RowTooWide { width: 5, max: 4 })
    ));
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = DiagnosticSession::load(Some(&missing), None).unwrap_err();
    assert!(matches!(err, BitdiagError::Config(_)));
}

#[test]
fn test_irregular_input_reported_through_session() {
    let err = DiagnosticSession::default()
        .diagnose_lines(["10110", "1011"])
        .unwrap_err();
    assert!(matches!(
        err,
        BitdiagError::Diagnostic(DiagnosticError::IrregularMatrix {
            row: 1,
            expected: 5,
            actual: 4
        })
    ));
}

#[test]
fn test_trace_toggle_from_config() {
    let session = DiagnosticSession::from_toml("[engine]\nrecord_trace = false\n").unwrap();
    let report = session.diagnose_lines(DIAGNOSTIC_LINES).unwrap();
    assert!(report.life_support.oxygen.trace.is_empty());
    assert_eq!(report.life_support.oxygen.columns_consumed, 5);
}

#[cfg(feature = "serde")]
#[test]
fn test_report_serializes() {
    let report = DiagnosticSession::default()
        .diagnose_lines(DIAGNOSTIC_LINES)
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["power"]["product"], 198);
    assert_eq!(json["life_support"]["oxygen"]["row"], "10111");
}
