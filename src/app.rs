//! Application logic for the optimizeql CLI.
//!
//! This module contains the command implementations separated from the main
//! entry point to enable testing. Each command returns a [`CommandOutput`]
//! holding the rendered text and the process exit code:
//!
//! - `0` - rendering succeeded, or every comparison matched
//! - `1` - results differ, or a side failed to run
//! - `2` - invocation or orchestration error (set by the binary)

mod compare;
mod convert;
mod helpers;
mod suggestions;
mod types;

pub use compare::{run_compare, run_verify};
pub use convert::{convert_dialect, convert_format};
pub use helpers::{
    EXIT_ERROR, apply_exec_overrides, build_comparator, compare_exit_code, create_output_options,
    read_input
};
pub use suggestions::run_suggestions;
pub use types::{CommandOutput, CompareParams, ExecParams, SuggestionsParams, VerifyParams};
