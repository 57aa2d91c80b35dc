//! Compare and verify commands.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::info;

use super::{
    helpers::{
        apply_exec_overrides, build_comparator, compare_exit_code, create_output_options,
        read_input, spinner
    },
    types::{CommandOutput, CompareParams, VerifyParams}
};
use crate::{
    compare::{CompareRequest, CompareResult},
    config::Config,
    error::{AppResult, comparison_error, error_message, input_error},
    output::{OutputFormat, format_compare_result},
    session::{AnalysisSession, RewriteCard},
    suggestions::{Impact, decode_analysis}
};

/// Runs one comparison between two SQL files.
///
/// # Errors
///
/// Returns an error if an input cannot be read, the request is invalid, or
/// the execution service is unavailable.
pub async fn run_compare(params: CompareParams, config: Config) -> AppResult<CommandOutput> {
    let original_sql = read_input(&params.original_path)?;
    let rewritten_sql = read_input(&params.rewritten_path)?;
    let config = apply_exec_overrides(config, &params.exec);
    let request = CompareRequest::new(original_sql, rewritten_sql, &params.exec.connection_id)
        .with_row_limit(config.compare.row_limit);
    let comparator = build_comparator(&config);

    let pb = spinner("Comparing query results...");
    let result = comparator.run(&request).await;
    pb.finish_and_clear();
    let result = result?;

    let opts = create_output_options(params.exec.output_format, params.exec.no_color, false);
    Ok(CommandOutput {
        exit_code: compare_exit_code(&result),
        output:    format_compare_result(&result, &opts)
    })
}

/// One verified rewrite, in card order
#[derive(Debug, Serialize)]
struct VerifiedRewrite {
    card:             String,
    explanation:      String,
    estimated_impact: Impact,
    sql:              Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result:           Option<CompareResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error:            Option<String>
}

/// Compares every rewrite suggestion of an analysis against the analyzed SQL.
///
/// Each rewrite gets its own card and comparison session; all cards run
/// concurrently and are reported in ranked order.
///
/// # Errors
///
/// Returns an error if an input cannot be read or decoded, or if the analyzed
/// SQL is blank.
pub async fn run_verify(params: VerifyParams, config: Config) -> AppResult<CommandOutput> {
    let raw = read_input(&params.input_path)?;
    let analysis = decode_analysis(&raw, &params.input_path)?;
    let sql = read_input(&params.sql_path)?;
    if sql.trim().is_empty() {
        return Err(input_error("analyzed SQL is empty"));
    }
    let config = apply_exec_overrides(config, &params.exec);

    let mut session = AnalysisSession::default()
        .with_connection(params.exec.connection_id.clone())
        .with_row_limit(config.compare.row_limit);
    session.load_result(sql, analysis);
    let cards = session.rewrite_cards();
    info!(cards = cards.len(), "verifying rewrite suggestions");

    let opts = create_output_options(params.exec.output_format, params.exec.no_color, false);
    if cards.is_empty() && opts.format == OutputFormat::Text {
        return Ok(CommandOutput {
            exit_code: 0,
            output:    "No rewrite suggestions with SQL to verify.\n".to_string()
        });
    }

    let comparator = Arc::new(build_comparator(&config));
    let mut tasks = JoinSet::new();
    for card in cards {
        let comparator = Arc::clone(&comparator);
        tasks.spawn(async move {
            let outcome = match &card.request {
                Some(request) => card.session.compare(&*comparator, request).await,
                None => Err(input_error("rewrite has no comparable SQL"))
            };
            (card, outcome)
        });
    }

    let pb = spinner("Verifying rewrites...");
    let mut finished: Vec<(RewriteCard, AppResult<CompareResult>)> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(entry) => finished.push(entry),
            Err(e) => {
                pb.finish_and_clear();
                return Err(comparison_error(format!("comparison task failed: {}", e)));
            }
        }
    }
    pb.finish_and_clear();
    finished.sort_by_key(|(card, _)| card.index);

    let verified: Vec<VerifiedRewrite> = finished
        .into_iter()
        .map(|(card, outcome)| {
            let (result, error) = match outcome {
                Ok(result) => (Some(result), None),
                Err(e) => (None, Some(error_message(&e)))
            };
            VerifiedRewrite {
                card: card.session.card().to_string(),
                explanation: card.item.explanation,
                estimated_impact: card.item.estimated_impact,
                sql: card.item.sql,
                result,
                error
            }
        })
        .collect();

    let exit_code = verify_exit_code(&verified);
    let output = match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(&verified).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(&verified).unwrap_or_default(),
        OutputFormat::Text => {
            let mut text = String::new();
            for (position, rewrite) in verified.iter().enumerate() {
                text.push_str(&format!(
                    "Rewrite #{} [{}] {}\n",
                    position + 1,
                    rewrite.estimated_impact.badge(),
                    rewrite.explanation.trim()
                ));
                match (&rewrite.result, &rewrite.error) {
                    (Some(result), _) => text.push_str(&format_compare_result(result, &opts)),
                    (None, Some(error)) => {
                        text.push_str(&format!("Comparison failed: {}\n", error));
                    }
                    (None, None) => {}
                }
                text.push('\n');
            }
            text
        }
    };
    Ok(CommandOutput {
        exit_code,
        output
    })
}

fn verify_exit_code(verified: &[VerifiedRewrite]) -> i32 {
    if verified.iter().any(|v| v.error.is_some()) {
        super::helpers::EXIT_ERROR
    } else if verified
        .iter()
        .filter_map(|v| v.result.as_ref())
        .all(CompareResult::is_verified)
    {
        0
    } else {
        1
    }
}
