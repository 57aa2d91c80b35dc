//! # optimizeql
//!
//! Presents SQL optimization suggestions ranked by estimated impact and
//! verifies query rewrites by comparing their results with the original.
//!
//! # Quick Start
//!
//! ```bash
//! # Ranked suggestion sections of a stored analysis
//! optimizeql suggestions -i analysis.json
//!
//! # Compare an original query with its rewrite on a live connection
//! optimizeql compare --original slow.sql --rewritten fast.sql -c prod-replica
//!
//! # Verify every rewrite suggestion of an analysis concurrently
//! optimizeql verify -i analysis.json --sql slow.sql -c prod-replica -f json
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence):
//!
//! 1. Command-line arguments
//! 2. Environment variables (`OPTIMIZEQL_EXECUTOR_URL`, `OPTIMIZEQL_API_KEY`)
//! 3. `.optimizeql.toml` in current directory
//! 4. `~/.config/optimizeql/config.toml`
//!
//! Diagnostics are written to stderr; set `OPTIMIZEQL_LOG=optimizeql=debug`
//! to see comparison details.
//!
//! # Exit Codes
//!
//! - `0` - Rendering succeeded, or all compared results match
//! - `1` - Results differ, or one side of a comparison failed
//! - `2` - Invalid invocation, unreadable input or execution service error

use std::process;

use clap::Parser;
use optimizeql::{
    app::{
        CommandOutput, CompareParams, EXIT_ERROR, ExecParams, SuggestionsParams, VerifyParams,
        run_compare, run_suggestions, run_verify
    },
    cli::{Cli, Commands, ExecArgs},
    config::Config,
    error::{AppResult, error_message},
    logging::init_logging
};
use tokio::main;

#[main]
async fn main() {
    match run().await {
        Ok(result) => {
            print!("{}", result.output);
            process::exit(result.exit_code);
        }
        Err(e) => {
            eprintln!("Error: {}", error_message(&e));
            process::exit(EXIT_ERROR);
        }
    }
}

async fn run() -> AppResult<CommandOutput> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_logging(config.log.filter.as_deref());

    match cli.command {
        Commands::Suggestions {
            input,
            output_format,
            verbose,
            no_color
        } => run_suggestions(SuggestionsParams {
            input_path: input.display().to_string(),
            output_format,
            verbose,
            no_color
        }),
        Commands::Compare {
            original,
            rewritten,
            exec
        } => {
            let params = CompareParams {
                original_path:  original.display().to_string(),
                rewritten_path: rewritten.display().to_string(),
                exec:           exec_params(exec)
            };
            run_compare(params, config).await
        }
        Commands::Verify {
            input,
            sql,
            exec
        } => {
            let params = VerifyParams {
                input_path: input.display().to_string(),
                sql_path:   sql.display().to_string(),
                exec:       exec_params(exec)
            };
            run_verify(params, config).await
        }
    }
}

fn exec_params(args: ExecArgs) -> ExecParams {
    ExecParams {
        connection_id: args.connection,
        row_limit:     args.row_limit,
        executor_url:  args.executor_url,
        api_key:       args.api_key,
        dialect:       args.dialect,
        output_format: args.output_format,
        no_color:      args.no_color
    }
}
