// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Global subscriber installation
//!
//! Kept in its own test binary: a process gets exactly one global subscriber.

use bitdiag_config::{LogFormat, LoggingConfig};
use bitdiag_observability::{init_logging, CrateDebugFlags};

#[test]
fn test_init_logging_installs_once() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Text,
        ..LoggingConfig::default()
    };
    let flags = CrateDebugFlags::from_names(["bitdiag-observability"]);

    let guard = init_logging(&config, &flags).unwrap();
    assert!(guard.log_dir().is_none());
    tracing::debug!(target: "bitdiag-observability", "subscriber installed");

    let second = init_logging(&config, &flags);
    let err = match second {
        Ok(_) => panic!("a second subscriber must be rejected"),
        Err(err) => err,
    };
    assert!(
        err.to_string().contains("already installed"),
        "unexpected error: {:#}",
        err
    );
}

#[test]
fn test_invalid_level_rejected_before_install() {
    let config = LoggingConfig {
        level: "bitdiag=loud".to_string(),
        ..LoggingConfig::default()
    };
    let err = match init_logging(&config, &CrateDebugFlags::default()) {
        Ok(_) => panic!("invalid filter must be rejected"),
        Err(err) => err,
    };
    assert!(err.to_string().starts_with("Invalid log filter"));
}
