//! Analysis result data model.
//!
//! These types mirror what the analysis collaborator produces. They are
//! immutable once decoded; the ranking layer only ever reads them and builds
//! new, reordered sequences.

use compact_str::CompactString;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::impact::Impact;

/// A single optimization suggestion (index, rewrite, view, bottleneck or
/// statistics change).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuggestionItem {
    /// SQL to apply, when the suggestion has one
    #[serde(default)]
    pub sql:              Option<String>,
    /// Why the suggestion helps
    #[serde(default)]
    pub explanation:      String,
    #[serde(default)]
    pub estimated_impact: Impact,
    /// EXPLAIN node the suggestion refers to (bottlenecks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_node:        Option<String>,
    /// Root cause category, e.g. `missing_index` (bottlenecks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause:       Option<String>,
    /// Index access method, e.g. `btree`, `gin` (indexes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_type:       Option<String>
}

impl SuggestionItem {
    pub fn new(explanation: impl Into<String>, estimated_impact: Impact) -> Self {
        Self {
            explanation: explanation.into(),
            estimated_impact,
            ..Default::default()
        }
    }

    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }
}

/// A server configuration change. Ranked like a suggestion, rendered on its
/// own card shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationItem {
    #[serde(default)]
    pub parameter:         String,
    #[serde(default = "unknown_value")]
    pub current_value:     String,
    #[serde(default)]
    pub recommended_value: String,
    #[serde(default)]
    pub explanation:       String,
    #[serde(default)]
    pub estimated_impact:  Impact
}

fn unknown_value() -> String {
    String::from("unknown")
}

/// Complete output of one analysis request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub query_id:           String,
    #[serde(default)]
    pub indexes:            Vec<SuggestionItem>,
    #[serde(default)]
    pub rewrites:           Vec<SuggestionItem>,
    #[serde(default)]
    pub materialized_views: Vec<SuggestionItem>,
    #[serde(default)]
    pub bottlenecks:        Vec<SuggestionItem>,
    #[serde(default)]
    pub statistics:         Vec<SuggestionItem>,
    #[serde(default)]
    pub configuration:      Vec<ConfigurationItem>,
    #[serde(default)]
    pub summary:            String,
    #[serde(default)]
    pub explain_plan:       Option<String>,
    /// Set when EXPLAIN could not run against the live database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explain_error:      Option<String>,
    /// Tables referenced by the analyzed query, in discovery order
    #[serde(default)]
    pub tables_analyzed:    IndexSet<CompactString>
}

impl AnalysisResult {
    /// True when no category and no configuration change holds an item
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
            && self.rewrites.is_empty()
            && self.materialized_views.is_empty()
            && self.bottlenecks.is_empty()
            && self.statistics.is_empty()
            && self.configuration.is_empty()
    }
}
