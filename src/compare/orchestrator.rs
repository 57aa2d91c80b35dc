//! Comparison orchestration.
//!
//! A [`Comparator`] runs the original and the rewritten query as two
//! independent executions against the same connection, joins both, and only
//! diffs the rows when both sides succeeded.
//!
//! ```text
//!                 ┌─────────────┐
//!            ┌───▶│  original   │───┐
//! ┌───────┐  │    └─────────────┘   │   ┌──────┐     ┌───────────────┐
//! │request│──┤                      ├──▶│ join │────▶│ diff / report │
//! └───────┘  │    ┌─────────────┐   │   └──────┘     └───────────────┘
//!            └───▶│  rewritten  │───┘
//!                 └─────────────┘
//! ```
//!
//! Failure isolation:
//!
//! - A query failure on one side is recorded in that side's error field and
//!   does not stop the other side.
//! - If either side failed, the row diff is skipped.
//! - If the execution service itself is unavailable, the whole comparison
//!   fails with a single top-level error.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::{
    diff::diff_rows,
    executor::{ExecutionError, QueryExecutor},
    guard::{SqlDialect, prepare_for_comparison},
    types::{CompareRequest, CompareResult, Row}
};
use crate::error::{AppResult, comparison_error};

/// Default per-side statement timeout.
pub const DEFAULT_STATEMENT_TIMEOUT_MS: u64 = 30_000;

/// Runs comparisons through a [`QueryExecutor`].
pub struct Comparator<E> {
    executor:          E,
    dialect:           SqlDialect,
    statement_timeout: Duration
}

impl<E: QueryExecutor> Comparator<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            dialect: SqlDialect::default(),
            statement_timeout: Duration::from_millis(DEFAULT_STATEMENT_TIMEOUT_MS)
        }
    }

    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_statement_timeout(mut self, statement_timeout: Duration) -> Self {
        self.statement_timeout = statement_timeout;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run one comparison.
    ///
    /// # Errors
    ///
    /// Returns an input error if the request is incomplete, or a comparison
    /// error if the execution service could not be reached for either side.
    /// Query failures are not errors here; they are reported in the result.
    pub async fn run(&self, request: &CompareRequest) -> AppResult<CompareResult> {
        let request = request.normalized()?;
        let row_limit = request.effective_row_limit();
        info!(
            connection_id = %request.connection_id,
            row_limit,
            "running query comparison"
        );

        let (original, rewritten) = tokio::join!(
            self.run_side(&request.connection_id, &request.original_sql, row_limit),
            self.run_side(&request.connection_id, &request.rewritten_sql, row_limit)
        );

        for side in [&original, &rewritten] {
            if let Err(e) = side
                && !e.is_query_failure()
            {
                return Err(comparison_error(e.to_string()));
            }
        }

        match (original, rewritten) {
            (Ok(original_rows), Ok(rewritten_rows)) => {
                let outcome = diff_rows(&original_rows, &rewritten_rows, row_limit);
                debug!(
                    results_match = outcome.results_match,
                    rows_compared = outcome.rows_compared,
                    first_diff = ?outcome.first_diff.as_ref().map(|d| d.row_number),
                    "compared result sets"
                );
                Ok(CompareResult::from_diff(outcome))
            }
            (original, rewritten) => {
                if let Err(e) = &original {
                    warn!(error = %e, "original query failed");
                }
                if let Err(e) = &rewritten {
                    warn!(error = %e, "rewritten query failed");
                }
                Ok(CompareResult::from_failures(
                    side_summary(original, row_limit),
                    side_summary(rewritten, row_limit)
                ))
            }
        }
    }

    async fn run_side(
        &self,
        connection_id: &str,
        sql: &str,
        row_limit: usize
    ) -> Result<Vec<Row>, ExecutionError> {
        let prepared = prepare_for_comparison(sql, row_limit, self.dialect)?;
        match timeout(
            self.statement_timeout,
            self.executor
                .execute_query(connection_id, &prepared, row_limit)
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ExecutionError::Timeout(
                self.statement_timeout.as_millis() as u64
            ))
        }
    }
}

fn side_summary(side: Result<Vec<Row>, ExecutionError>, row_limit: usize) -> Result<usize, String> {
    side.map(|rows| rows.len().min(row_limit))
        .map_err(|e| e.to_string().trim().to_string())
}
