//! Tolerant decoding of analysis payloads.
//!
//! Analysis results come from a language model, so the payload is treated as
//! untrusted: a surrounding markdown fence is stripped, every section is
//! optional, and malformed entries are skipped rather than failing the whole
//! result.

use std::sync::LazyLock;

use compact_str::CompactString;
use indexmap::IndexSet;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use super::types::{AnalysisResult, ConfigurationItem, SuggestionItem};
use crate::error::{AppResult, analysis_decode_error};

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```(?:json)?\s*\n?(.*?)\n?\s*```$").expect("valid regex"));

/// Remove a markdown code fence wrapped around `raw`, if any
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    FENCE_RE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map_or(trimmed, |m| m.as_str().trim())
}

/// Decode an analysis payload.
///
/// `fallback_query_id` is used when the payload does not carry its own id.
///
/// # Errors
///
/// Returns an error if the payload is not a JSON object.
///
/// # Example
///
/// ```
/// use optimizeql::suggestions::{Impact, decode_analysis};
///
/// let raw = "```json\n{\"rewrites\": [{\"sql\": \"SELECT 1\", \"explanation\": \"x\", \"estimated_impact\": \"high\"}]}\n```";
/// let result = decode_analysis(raw, "q-1").unwrap();
/// assert_eq!(result.query_id, "q-1");
/// assert_eq!(result.rewrites[0].estimated_impact, Impact::High);
/// ```
pub fn decode_analysis(raw: &str, fallback_query_id: &str) -> AppResult<AnalysisResult> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(analysis_decode_error("payload is empty"));
    }
    let value: Value = serde_json::from_str(body)
        .map_err(|e| analysis_decode_error(format!("not valid JSON: {}", e)))?;
    let Value::Object(obj) = value else {
        return Err(analysis_decode_error("expected a JSON object at top level"));
    };

    Ok(AnalysisResult {
        query_id:           text_field(&obj, "query_id")
            .unwrap_or_else(|| fallback_query_id.to_string()),
        indexes:            suggestion_list(&obj, "indexes"),
        rewrites:           suggestion_list(&obj, "rewrites"),
        materialized_views: suggestion_list(&obj, "materialized_views"),
        bottlenecks:        suggestion_list(&obj, "bottlenecks"),
        statistics:         suggestion_list(&obj, "statistics"),
        configuration:      entry_list::<ConfigurationItem>(&obj, "configuration"),
        summary:            text_field(&obj, "summary").unwrap_or_default(),
        explain_plan:       text_field(&obj, "explain_plan"),
        explain_error:      text_field(&obj, "explain_error"),
        tables_analyzed:    table_list(&obj)
    })
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn suggestion_list(obj: &Map<String, Value>, key: &str) -> Vec<SuggestionItem> {
    entry_list::<SuggestionItem>(obj, key)
        .into_iter()
        .map(|mut item| {
            item.sql = item.sql.filter(|s| !s.is_empty());
            item.plan_node = item.plan_node.filter(|s| !s.is_empty());
            item.root_cause = item.root_cause.filter(|s| !s.is_empty());
            item.index_type = item.index_type.filter(|s| !s.is_empty());
            item
        })
        .collect()
}

fn entry_list<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Vec<T> {
    let Some(Value::Array(entries)) = obj.get(key) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter(|entry| entry.is_object())
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(section = key, error = %e, "skipping malformed analysis entry");
                None
            }
        })
        .collect()
}

fn table_list(obj: &Map<String, Value>) -> IndexSet<CompactString> {
    let Some(Value::Array(tables)) = obj.get("tables_analyzed") else {
        return IndexSet::new();
    };
    tables
        .iter()
        .filter_map(Value::as_str)
        .map(CompactString::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fence_plain() {
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }

    #[test]
    fn test_strip_fence_json_tag() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_fence_absent() {
        assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
    }
}
