//! Read-only guard for SQL sent to comparison.
//!
//! A comparison executes user-supplied SQL twice against a live database, so
//! each side must be a single query statement. Anything that writes (DML,
//! DDL, row locks) is refused before it reaches the executor.

use sqlparser::{
    ast::{SetExpr, Statement},
    dialect::{
        ClickHouseDialect, Dialect, GenericDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect
    },
    parser::Parser
};

use super::executor::ExecutionError;
use crate::error::query_guard_error;

/// SQL dialect for parsing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SqlDialect {
    #[default]
    Generic,
    MySQL,
    PostgreSQL,
    SQLite,
    ClickHouse
}

impl SqlDialect {
    /// Convert to sqlparser dialect for parsing
    pub fn into_parser_dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::MySQL => Box::new(MySqlDialect {}),
            Self::PostgreSQL => Box::new(PostgreSqlDialect {}),
            Self::SQLite => Box::new(SQLiteDialect {}),
            Self::ClickHouse => Box::new(ClickHouseDialect {})
        }
    }
}

/// Prepare one side of a comparison for execution.
///
/// Returns the SQL to send: the parsed query re-rendered, with
/// `LIMIT row_limit` appended when the query has no limit of its own.
///
/// # Errors
///
/// Returns [`ExecutionError::Rejected`] if the text does not parse, holds
/// more or fewer than one statement, or is not a read-only query.
///
/// # Example
///
/// ```
/// use optimizeql::compare::{SqlDialect, prepare_for_comparison};
///
/// let sql = prepare_for_comparison("SELECT id FROM users;", 100, SqlDialect::Generic).unwrap();
/// assert_eq!(sql, "SELECT id FROM users LIMIT 100");
///
/// assert!(prepare_for_comparison("DELETE FROM users", 100, SqlDialect::Generic).is_err());
/// ```
pub fn prepare_for_comparison(
    sql: &str,
    row_limit: usize,
    dialect: SqlDialect
) -> Result<String, ExecutionError> {
    let parser_dialect = dialect.into_parser_dialect();
    let mut statements = Parser::parse_sql(parser_dialect.as_ref(), sql)
        .map_err(|e| ExecutionError::Rejected(query_guard_error(e.to_string())))?;
    if statements.len() != 1 {
        return Err(ExecutionError::Rejected(query_guard_error(format!(
            "expected exactly one statement, found {}",
            statements.len()
        ))));
    }
    let Some(Statement::Query(query)) = statements.pop() else {
        return Err(ExecutionError::Rejected(query_guard_error(
            "only SELECT queries can be compared"
        )));
    };
    let writes_in_cte = query
        .with
        .iter()
        .flat_map(|w| &w.cte_tables)
        .any(|cte| !is_read_only(&cte.query.body));
    if !is_read_only(&query.body) || writes_in_cte {
        return Err(ExecutionError::Rejected(query_guard_error(
            "data-modifying queries cannot be compared"
        )));
    }
    if !query.locks.is_empty() {
        return Err(ExecutionError::Rejected(query_guard_error(
            "queries that lock rows cannot be compared"
        )));
    }

    let rendered = query.to_string();
    if query.limit_clause.is_some() || query.fetch.is_some() {
        Ok(rendered)
    } else {
        Ok(format!("{} LIMIT {}", rendered, row_limit))
    }
}

fn is_read_only(body: &SetExpr) -> bool {
    match body {
        // SELECT ... INTO creates a table
        SetExpr::Select(select) => select.into.is_none(),
        SetExpr::Values(_) | SetExpr::Table(_) => true,
        SetExpr::Query(inner) => is_read_only(&inner.body),
        SetExpr::SetOperation {
            left, right, ..
        } => is_read_only(left) && is_read_only(right),
        _ => false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_limit_is_kept() {
        let sql = prepare_for_comparison("SELECT id FROM t LIMIT 5", 100, SqlDialect::Generic)
            .unwrap();
        assert_eq!(sql, "SELECT id FROM t LIMIT 5");
    }

    #[test]
    fn test_select_into_rejected() {
        for sql in [
            "SELECT * INTO backup_users FROM users",
            "SELECT id FROM a UNION SELECT id INTO b FROM c",
            "WITH x AS (SELECT * INTO t FROM users) SELECT * FROM x"
        ] {
            let err = prepare_for_comparison(sql, 100, SqlDialect::PostgreSQL).unwrap_err();
            assert!(matches!(err, ExecutionError::Rejected(_)), "{}", sql);
        }
    }

    #[test]
    fn test_parse_error_is_rejection() {
        let err = prepare_for_comparison("SELEC id FROM", 100, SqlDialect::Generic).unwrap_err();
        assert!(matches!(err, ExecutionError::Rejected(_)));
    }
}
