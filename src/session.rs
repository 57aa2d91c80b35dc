//! Analysis session.
//!
//! Holds what one analysis view works with: the SQL under analysis, the chosen
//! connection, the last analysis result and the last error. The session is an
//! explicit value passed to whoever needs it; nothing here is global.
//!
//! Rewrite suggestions become [`RewriteCard`]s, each owning its own
//! [`ComparisonSession`], so verifying one rewrite never blocks or overwrites
//! another.

use crate::{
    compare::{CompareRequest, ComparisonSession},
    suggestions::{AnalysisResult, ComposedSections, SuggestionItem, compose, rank_by_impact}
};

/// State of one analysis view.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    sql:           String,
    connection_id: Option<String>,
    row_limit:     Option<usize>,
    result:        Option<AnalysisResult>,
    error:         Option<String>
}

/// A rewrite suggestion ready for verification.
#[derive(Debug)]
pub struct RewriteCard {
    /// Position among the ranked rewrites
    pub index:   usize,
    pub item:    SuggestionItem,
    /// `None` until the session has SQL and a connection
    pub request: Option<CompareRequest>,
    pub session: ComparisonSession
}

impl AnalysisSession {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            ..Default::default()
        }
    }

    pub fn with_connection(mut self, connection_id: impl Into<String>) -> Self {
        self.connection_id = Some(connection_id.into());
        self
    }

    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = Some(row_limit);
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn set_sql(&mut self, sql: impl Into<String>) {
        self.sql = sql.into();
    }

    pub fn connection_id(&self) -> Option<&str> {
        self.connection_id.as_deref()
    }

    pub fn set_connection(&mut self, connection_id: Option<String>) {
        self.connection_id = connection_id;
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show a stored analysis without re-running it.
    pub fn load_result(&mut self, sql: impl Into<String>, result: AnalysisResult) {
        self.sql = sql.into();
        self.result = Some(result);
        self.error = None;
    }

    /// Record a failed analysis. The previous result is dropped.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.result = None;
        self.error = Some(error.into());
    }

    /// Composed sections of the current result
    pub fn sections(&self) -> Option<ComposedSections> {
        self.result.as_ref().map(compose)
    }

    /// Comparison request for verifying `item`.
    ///
    /// Present only when the session has SQL and a connection and the item
    /// carries SQL of its own.
    pub fn verification_request(&self, item: &SuggestionItem) -> Option<CompareRequest> {
        let original = non_blank(Some(self.sql.as_str()))?;
        let connection = non_blank(self.connection_id.as_deref())?;
        let rewritten = non_blank(item.sql.as_deref())?;
        let request = CompareRequest::new(original, rewritten, connection);
        Some(match self.row_limit {
            Some(limit) => request.with_row_limit(limit),
            None => request
        })
    }

    /// One card per rewrite suggestion that carries SQL, in ranked order.
    pub fn rewrite_cards(&self) -> Vec<RewriteCard> {
        let Some(result) = &self.result else {
            return Vec::new();
        };
        rank_by_impact(&result.rewrites)
            .into_iter()
            .filter(|item| non_blank(item.sql.as_deref()).is_some())
            .enumerate()
            .map(|(index, item)| RewriteCard {
                index,
                request: self.verification_request(&item),
                session: ComparisonSession::new(format!("rewrite-{}", index + 1)),
                item
            })
            .collect()
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|s| !s.is_empty())
}
