// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use optimizeql::{
    error::{AppErrorKind, error_message},
    suggestions::{Impact, decode_analysis}
};

const FULL_PAYLOAD: &str = r#"{
    "query_id": "q-42",
    "summary": "Sequential scan on orders dominates the plan.",
    "explain_plan": "Seq Scan on orders  (cost=0.00..431.00 rows=21000)",
    "tables_analyzed": ["orders", "users", "orders"],
    "indexes": [
        {"sql": "CREATE INDEX idx_orders_user ON orders (user_id)", "explanation": "filter column", "estimated_impact": "high", "index_type": "btree"}
    ],
    "rewrites": [
        {"sql": "", "explanation": "no sql given", "estimated_impact": "low"},
        "not an object",
        {"sql": "SELECT id FROM orders WHERE user_id = 1", "explanation": "narrow columns", "estimated_impact": "medium"}
    ],
    "bottlenecks": [
        {"explanation": "full scan", "estimated_impact": "high", "plan_node": "Seq Scan", "root_cause": "missing_index"}
    ],
    "configuration": [
        {"parameter": "work_mem", "recommended_value": "64MB", "explanation": "sort spills", "estimated_impact": "medium"}
    ]
}"#;

#[test]
fn test_decode_full_payload() {
    let result = decode_analysis(FULL_PAYLOAD, "fallback").unwrap();
    assert_eq!(result.query_id, "q-42");
    assert_eq!(result.indexes.len(), 1);
    assert_eq!(result.indexes[0].index_type.as_deref(), Some("btree"));
    assert_eq!(result.bottlenecks[0].root_cause.as_deref(), Some("missing_index"));
    assert!(result.materialized_views.is_empty());
    assert!(result.statistics.is_empty());
    assert!(result.explain_plan.is_some());
    assert!(result.explain_error.is_none());
}

#[test]
fn test_non_object_entries_skipped() {
    let result = decode_analysis(FULL_PAYLOAD, "fallback").unwrap();
    assert_eq!(result.rewrites.len(), 2);
    assert_eq!(result.rewrites[1].explanation, "narrow columns");
}

#[test]
fn test_empty_sql_is_absent() {
    let result = decode_analysis(FULL_PAYLOAD, "fallback").unwrap();
    assert!(result.rewrites[0].sql.is_none());
    assert!(result.rewrites[1].sql.is_some());
}

#[test]
fn test_tables_deduplicated_in_order() {
    let result = decode_analysis(FULL_PAYLOAD, "fallback").unwrap();
    let tables: Vec<_> = result.tables_analyzed.iter().map(|t| t.as_str()).collect();
    assert_eq!(tables, ["orders", "users"]);
}

#[test]
fn test_configuration_current_value_defaults() {
    let result = decode_analysis(FULL_PAYLOAD, "fallback").unwrap();
    assert_eq!(result.configuration[0].current_value, "unknown");
    assert_eq!(result.configuration[0].estimated_impact, Impact::Medium);
}

#[test]
fn test_fallback_query_id() {
    let result = decode_analysis("{}", "from-file").unwrap();
    assert_eq!(result.query_id, "from-file");
    assert!(result.is_empty());
    assert_eq!(result.summary, "");
}

#[test]
fn test_unrecognized_impact_kept() {
    let raw = r#"{"statistics": [{"explanation": "x", "estimated_impact": "critical"}]}"#;
    let result = decode_analysis(raw, "q").unwrap();
    assert_eq!(
        result.statistics[0].estimated_impact,
        Impact::from("critical")
    );
    assert_eq!(result.statistics[0].estimated_impact.rank(), 3);
}

#[test]
fn test_non_string_impact_kept() {
    let raw = r#"{"rewrites": [
        {"sql": "SELECT 1", "explanation": "numeric label", "estimated_impact": 2},
        {"sql": "SELECT 2", "explanation": "boolean label", "estimated_impact": true},
        {"sql": "SELECT 3", "explanation": "list label", "estimated_impact": ["high"]},
        {"sql": "SELECT 4", "explanation": "plain", "estimated_impact": "high"}
    ]}"#;
    let result = decode_analysis(raw, "q").unwrap();
    assert_eq!(result.rewrites.len(), 4);
    assert_eq!(result.rewrites[0].explanation, "numeric label");
    assert_eq!(result.rewrites[0].estimated_impact, Impact::from("2"));
    assert!(result.rewrites[..3].iter().all(|r| r.estimated_impact.rank() == 3));
    assert_eq!(result.rewrites[3].estimated_impact, Impact::High);
}

#[test]
fn test_missing_and_null_impact() {
    let raw = r#"{"indexes": [{"explanation": "a"}, {"explanation": "b", "estimated_impact": null}]}"#;
    let result = decode_analysis(raw, "q").unwrap();
    assert_eq!(result.indexes.len(), 2);
    assert!(result.indexes.iter().all(|i| i.estimated_impact.rank() == 3));
}

#[test]
fn test_explain_error_carried() {
    let raw = r#"{"explain_error": "permission denied for table orders"}"#;
    let result = decode_analysis(raw, "q").unwrap();
    assert_eq!(
        result.explain_error.as_deref(),
        Some("permission denied for table orders")
    );
}

#[test]
fn test_fenced_payload() {
    let raw = "```json\n{\"summary\": \"ok\"}\n```";
    let result = decode_analysis(raw, "q").unwrap();
    assert_eq!(result.summary, "ok");
}

#[test]
fn test_invalid_json_is_error() {
    let err = decode_analysis("{not json", "q").unwrap_err();
    assert_eq!(err.kind, AppErrorKind::BadRequest);
    assert!(error_message(&err).contains("not valid JSON"));
}

#[test]
fn test_empty_payload_is_error() {
    assert!(decode_analysis("   ", "q").is_err());
    assert!(decode_analysis("[1, 2]", "q").is_err());
}
