//! Helper functions for CLI operations.

use std::{
    fs::read_to_string,
    io::{self, Read},
    time::Duration
};

use indicatif::{ProgressBar, ProgressStyle};

use super::{
    convert::{convert_dialect, convert_format},
    types::ExecParams
};
use crate::{
    cli::Format,
    compare::{Comparator, CompareResult, HttpExecutor},
    config::Config,
    error::{AppResult, file_read_error},
    output::OutputOptions
};

/// Exit code for invocation and orchestration errors.
pub const EXIT_ERROR: i32 = 2;

/// Calculates the exit code of one comparison.
///
/// - `0` - both sides ran and the results match
/// - `1` - the results differ or a side failed to run
///
/// # Example
///
/// ```
/// use optimizeql::{
///     app::compare_exit_code,
///     compare::{CompareResult, diff_rows}
/// };
///
/// let rows = vec![vec![serde_json::json!(1)]];
/// let result = CompareResult::from_diff(diff_rows(&rows, &rows, 100));
/// assert_eq!(compare_exit_code(&result), 0);
/// ```
pub fn compare_exit_code(result: &CompareResult) -> i32 {
    if result.is_verified() { 0 } else { 1 }
}

/// Reads input from a file path, or from stdin when the path is "-".
///
/// # Errors
///
/// Returns an error if the file cannot be read or stdin fails.
pub fn read_input(path: &str) -> AppResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(path, e))
    }
}

/// Creates output options from CLI parameters.
pub fn create_output_options(format: Format, no_color: bool, verbose: bool) -> OutputOptions {
    OutputOptions {
        format: convert_format(format),
        colored: !no_color,
        verbose
    }
}

/// Applies command-line overrides on top of the loaded configuration.
pub fn apply_exec_overrides(mut config: Config, exec: &ExecParams) -> Config {
    if let Some(url) = &exec.executor_url {
        config.executor.base_url = url.clone();
    }
    if let Some(key) = &exec.api_key {
        config.executor.api_key = Some(key.clone());
    }
    if let Some(dialect) = exec.dialect {
        config.compare.dialect = convert_dialect(dialect);
    }
    if let Some(row_limit) = exec.row_limit {
        config.compare.row_limit = row_limit;
    }
    config
}

/// Builds a comparator backed by the configured execution service.
pub fn build_comparator(config: &Config) -> Comparator<HttpExecutor> {
    Comparator::new(HttpExecutor::new(config))
        .with_dialect(config.compare.dialect)
        .with_statement_timeout(Duration::from_millis(config.compare.statement_timeout_ms))
}

pub(super) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
