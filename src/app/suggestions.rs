//! Suggestions command.

use super::{
    helpers::{create_output_options, read_input},
    types::{CommandOutput, SuggestionsParams}
};
use crate::{
    error::AppResult,
    output::format_sections,
    suggestions::{compose, decode_analysis}
};

/// Decodes an analysis result and renders its ranked sections.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not an analysis
/// payload.
pub fn run_suggestions(params: SuggestionsParams) -> AppResult<CommandOutput> {
    let raw = read_input(&params.input_path)?;
    let result = decode_analysis(&raw, &params.input_path)?;
    let sections = compose(&result);
    let opts = create_output_options(params.output_format, params.no_color, params.verbose);
    Ok(CommandOutput {
        exit_code: 0,
        output:    format_sections(&result, &sections, &opts)
    })
}
