//! Comparison request and report types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppResult, input_error};

/// One result row: an ordered sequence of opaque column values.
pub type Row = Vec<Value>;

/// Row cap applied when a request does not set one.
pub const DEFAULT_ROW_LIMIT: usize = 100;

/// Largest row cap a request may ask for.
pub const MAX_ROW_LIMIT: usize = 1000;

/// Request to run an original query and its rewrite and compare the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareRequest {
    pub original_sql:  String,
    pub rewritten_sql: String,
    pub connection_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_limit:     Option<usize>
}

impl CompareRequest {
    pub fn new(
        original_sql: impl Into<String>,
        rewritten_sql: impl Into<String>,
        connection_id: impl Into<String>
    ) -> Self {
        Self {
            original_sql:  original_sql.into(),
            rewritten_sql: rewritten_sql.into(),
            connection_id: connection_id.into(),
            row_limit:     None
        }
    }

    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = Some(row_limit);
        self
    }

    /// Row cap for this request, [`DEFAULT_ROW_LIMIT`] when unset
    pub fn effective_row_limit(&self) -> usize {
        self.row_limit.unwrap_or(DEFAULT_ROW_LIMIT)
    }

    /// Trim all text fields and check that the request can be compared.
    ///
    /// # Errors
    ///
    /// Returns an input error if either SQL text or the connection id is
    /// blank, or if the row limit is outside `1..=1000`.
    pub fn normalized(&self) -> AppResult<Self> {
        let original_sql = self.original_sql.trim();
        let rewritten_sql = self.rewritten_sql.trim();
        let connection_id = self.connection_id.trim();
        if original_sql.is_empty() {
            return Err(input_error("original SQL is empty"));
        }
        if rewritten_sql.is_empty() {
            return Err(input_error("rewritten SQL is empty"));
        }
        if connection_id.is_empty() {
            return Err(input_error("connection id is empty"));
        }
        if let Some(limit) = self.row_limit
            && !(1..=MAX_ROW_LIMIT).contains(&limit)
        {
            return Err(input_error(format!(
                "row limit must be between 1 and {}, got {}",
                MAX_ROW_LIMIT, limit
            )));
        }
        Ok(Self {
            original_sql:  original_sql.to_string(),
            rewritten_sql: rewritten_sql.to_string(),
            connection_id: connection_id.to_string(),
            row_limit:     self.row_limit
        })
    }
}

/// First position where the two result sets disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDiff {
    /// 1-based row position
    pub row_number:    usize,
    pub original_row:  Row,
    pub rewritten_row: Row
}

/// Outcome of diffing two row sequences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffOutcome {
    pub results_match:       bool,
    pub rows_compared:       usize,
    pub original_row_count:  usize,
    pub rewritten_row_count: usize,
    pub first_diff:          Option<RowDiff>
}

/// Report of one comparison.
///
/// When either error field is set, `results_match` carries no meaning and is
/// always `false`; use [`CompareResult::is_verified`] rather than reading the
/// flag directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResult {
    pub results_match:       bool,
    pub rows_compared:       usize,
    pub original_row_count:  usize,
    pub rewritten_row_count: usize,
    pub first_diff:          Option<RowDiff>,
    pub original_error:      Option<String>,
    pub rewritten_error:     Option<String>
}

impl CompareResult {
    /// Report for two successful executions
    pub fn from_diff(outcome: DiffOutcome) -> Self {
        Self {
            results_match:       outcome.results_match,
            rows_compared:       outcome.rows_compared,
            original_row_count:  outcome.original_row_count,
            rewritten_row_count: outcome.rewritten_row_count,
            first_diff:          outcome.first_diff,
            original_error:      None,
            rewritten_error:     None
        }
    }

    /// Report for a comparison where at least one side failed to run.
    ///
    /// Row counts reflect whatever the successful side returned.
    pub fn from_failures(
        original: Result<usize, String>,
        rewritten: Result<usize, String>
    ) -> Self {
        let (original_row_count, original_error) = split_side(original);
        let (rewritten_row_count, rewritten_error) = split_side(rewritten);
        Self {
            results_match: false,
            rows_compared: 0,
            original_row_count,
            rewritten_row_count,
            first_diff: None,
            original_error,
            rewritten_error
        }
    }

    pub fn has_errors(&self) -> bool {
        self.original_error.is_some() || self.rewritten_error.is_some()
    }

    /// Both sides ran and produced the same rows in the same order
    pub fn is_verified(&self) -> bool {
        !self.has_errors() && self.results_match
    }

    /// All compared rows matched but the sequences differ in length
    pub fn is_cardinality_mismatch(&self) -> bool {
        !self.has_errors()
            && !self.results_match
            && self.first_diff.is_none()
            && self.original_row_count != self.rewritten_row_count
    }
}

fn split_side(side: Result<usize, String>) -> (usize, Option<String>) {
    match side {
        Ok(count) => (count, None),
        Err(error) => (0, Some(error))
    }
}
