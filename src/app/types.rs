//! Application types for CLI commands.

use crate::cli::{Dialect, Format};

/// Parameters for the suggestions command.
#[derive(Debug, Clone)]
pub struct SuggestionsParams {
    /// Path to the analysis JSON or "-" for stdin.
    pub input_path:    String,
    pub output_format: Format,
    /// Include the EXPLAIN plan.
    pub verbose:       bool,
    pub no_color:      bool
}

/// Options shared by the commands that execute queries.
///
/// # Example
///
/// ```
/// use optimizeql::{app::ExecParams, cli::Format};
///
/// let exec = ExecParams {
///     connection_id: "conn-1".to_string(),
///     row_limit:     Some(50),
///     executor_url:  None,
///     api_key:       None,
///     dialect:       None,
///     output_format: Format::Text,
///     no_color:      true
/// };
/// assert_eq!(exec.row_limit, Some(50));
/// ```
#[derive(Debug, Clone)]
pub struct ExecParams {
    /// Connection id known to the execution service.
    pub connection_id: String,
    /// Overrides `compare.row_limit` from the config.
    pub row_limit:     Option<usize>,
    /// Overrides `executor.base_url` from the config.
    pub executor_url:  Option<String>,
    /// Overrides `executor.api_key` from the config.
    pub api_key:       Option<String>,
    /// Overrides `compare.dialect` from the config.
    pub dialect:       Option<Dialect>,
    pub output_format: Format,
    pub no_color:      bool
}

/// Parameters for the compare command.
#[derive(Debug, Clone)]
pub struct CompareParams {
    /// Path to the original SQL or "-" for stdin.
    pub original_path:  String,
    pub rewritten_path: String,
    pub exec:           ExecParams
}

/// Parameters for the verify command.
#[derive(Debug, Clone)]
pub struct VerifyParams {
    pub input_path: String,
    /// Path to the analyzed SQL or "-" for stdin.
    pub sql_path:   String,
    pub exec:       ExecParams
}

/// Rendered command output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub output:    String
}
