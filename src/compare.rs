//! Rewrite verification by result comparison.
//!
//! A rewrite suggestion is only worth adopting if it returns the same rows as
//! the original query. This module executes both through a
//! [`QueryExecutor`], then diffs the two row sequences:
//!
//! - [`diff_rows`] - pure row diff, first mismatch and row counts
//! - [`Comparator`] - runs both sides concurrently with failure isolation
//! - [`ComparisonSession`] - per-card state, one comparison in flight at most
//! - [`HttpExecutor`] - executor backed by a remote execution service
//! - [`prepare_for_comparison`] - refuses anything but a single read-only query

mod diff;
mod executor;
mod guard;
mod http;
mod orchestrator;
mod session;
mod types;

pub use diff::diff_rows;
pub use executor::{ExecutionError, QueryExecutor};
pub use guard::{SqlDialect, prepare_for_comparison};
pub use http::HttpExecutor;
pub use orchestrator::{Comparator, DEFAULT_STATEMENT_TIMEOUT_MS};
pub use session::{ComparisonSession, ComparisonState};
pub use types::{
    CompareRequest, CompareResult, DEFAULT_ROW_LIMIT, DiffOutcome, MAX_ROW_LIMIT, Row, RowDiff
};
