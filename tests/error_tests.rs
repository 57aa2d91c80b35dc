// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use optimizeql::error::{
    AppErrorKind, analysis_decode_error, comparison_error, comparison_in_flight, config_error,
    error_message, file_read_error, input_error, query_guard_error
};

#[test]
fn test_file_read_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = file_read_error("/path/to/analysis.json", io_error);
    assert_eq!(error.kind, AppErrorKind::Internal);
    assert!(error_message(&error).contains("/path/to/analysis.json"));
}

#[test]
fn test_input_error() {
    let error = input_error("connection id is empty");
    assert_eq!(error.kind, AppErrorKind::BadRequest);
    assert_eq!(
        error_message(&error),
        "Invalid comparison request: connection id is empty"
    );
}

#[test]
fn test_comparison_error() {
    let error = comparison_error("execution service unavailable: connection refused");
    assert_eq!(error.kind, AppErrorKind::Service);
    assert!(error_message(&error).starts_with("Query comparison failed"));
}

#[test]
fn test_comparison_in_flight() {
    let error = comparison_in_flight("rewrite-2");
    assert_eq!(error.kind, AppErrorKind::Conflict);
    assert!(error_message(&error).contains("rewrite-2"));
}

#[test]
fn test_analysis_decode_error() {
    let error = analysis_decode_error("payload is empty");
    assert_eq!(error.kind, AppErrorKind::BadRequest);
}

#[test]
fn test_config_error() {
    let error = config_error("Invalid config file");
    assert_eq!(error_message(&error), "Invalid config file");
}

#[test]
fn test_query_guard_error_with_position() {
    let msg = query_guard_error("Expected: an SQL statement, found: SELEC at Line: 1, Column 1");
    assert!(msg.starts_with("Query rejected at line 1, column 1"));
}

#[test]
fn test_query_guard_error_without_position() {
    let msg = query_guard_error("only SELECT queries can be compared");
    assert_eq!(msg, "Query rejected: only SELECT queries can be compared");
}

#[test]
fn test_all_errors_display() {
    let errors = [
        input_error("x"),
        comparison_error("x"),
        comparison_in_flight("x"),
        config_error("x")
    ];
    for error in &errors {
        assert!(!error.to_string().is_empty());
    }
}
