//! Seam to the query execution collaborator.
//!
//! The comparison core never talks to a database itself. It hands SQL to a
//! [`QueryExecutor`] and gets rows or an [`ExecutionError`] back.

use async_trait::async_trait;
use thiserror::Error;

use super::types::Row;

/// Why one side of a comparison produced no rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The database rejected or failed the query
    #[error("{0}")]
    Query(String),
    /// The query exceeded the statement timeout
    #[error("query timed out after {0} ms")]
    Timeout(u64),
    /// The query was refused before being sent (not a single read-only query)
    #[error("{0}")]
    Rejected(String),
    /// The execution service itself could not be reached or answered
    /// unexpectedly. Not a property of the query.
    #[error("execution service unavailable: {0}")]
    Unavailable(String)
}

impl ExecutionError {
    /// True when the failure is about the query, not about reaching the
    /// execution service
    pub fn is_query_failure(&self) -> bool {
        !matches!(self, Self::Unavailable(_))
    }
}

/// Runs SQL against a stored connection.
///
/// Implementations must return at most `row_limit` rows, in the order the
/// database produced them.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute_query(
        &self,
        connection_id: &str,
        sql: &str,
        row_limit: usize
    ) -> Result<Vec<Row>, ExecutionError>;
}

#[async_trait]
impl<E: QueryExecutor + ?Sized> QueryExecutor for std::sync::Arc<E> {
    async fn execute_query(
        &self,
        connection_id: &str,
        sql: &str,
        row_limit: usize
    ) -> Result<Vec<Row>, ExecutionError> {
        (**self).execute_query(connection_id, sql, row_limit).await
    }
}
