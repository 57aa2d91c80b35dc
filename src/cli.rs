use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// optimizeql - Rank SQL optimization suggestions and verify rewrites
#[derive(Parser, Debug)]
#[command(name = "optimizeql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the ranked suggestion sections of an analysis result
    Suggestions {
        /// Path to analysis result JSON (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Include the EXPLAIN plan
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },

    /// Run an original query and its rewrite and compare the results
    Compare {
        /// Path to the original SQL (use - for stdin)
        #[arg(long)]
        original: PathBuf,

        /// Path to the rewritten SQL
        #[arg(long)]
        rewritten: PathBuf,

        #[command(flatten)]
        exec: ExecArgs
    },

    /// Compare every rewrite suggestion of an analysis against the original
    Verify {
        /// Path to analysis result JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the analyzed SQL (use - for stdin)
        #[arg(long)]
        sql: PathBuf,

        #[command(flatten)]
        exec: ExecArgs
    }
}

/// Options shared by commands that execute queries
#[derive(clap::Args, Debug, Clone)]
pub struct ExecArgs {
    /// Connection id known to the execution service
    #[arg(short, long)]
    pub connection: String,

    /// Maximum rows compared per side (1-1000)
    #[arg(long)]
    pub row_limit: Option<usize>,

    /// Execution service base URL
    #[arg(long, env = "OPTIMIZEQL_EXECUTOR_URL")]
    pub executor_url: Option<String>,

    /// Execution service API key
    #[arg(long, env = "OPTIMIZEQL_API_KEY")]
    pub api_key: Option<String>,

    /// SQL dialect for parsing
    #[arg(long, value_enum)]
    pub dialect: Option<Dialect>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    pub output_format: Format,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Dialect {
    Generic,
    Mysql,
    Postgresql,
    Sqlite,
    Clickhouse
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
