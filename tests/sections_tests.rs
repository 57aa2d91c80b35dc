// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use optimizeql::suggestions::{
    AnalysisResult, CategoryKind, ConfigurationItem, Impact, SuggestionItem, compose
};

fn item(explanation: &str, impact: Impact) -> SuggestionItem {
    SuggestionItem::new(explanation, impact)
}

fn kinds(result: &AnalysisResult) -> Vec<CategoryKind> {
    compose(result).categories.iter().map(|c| c.kind).collect()
}

fn configuration(parameter: &str, impact: Impact) -> ConfigurationItem {
    ConfigurationItem {
        parameter:         parameter.to_string(),
        current_value:     "unknown".to_string(),
        recommended_value: "on".to_string(),
        explanation:       String::new(),
        estimated_impact:  impact
    }
}

#[test]
fn test_high_rewrite_before_low_index() {
    let result = AnalysisResult {
        bottlenecks: vec![],
        indexes: vec![item("index on orders.user_id", Impact::Low)],
        rewrites: vec![item("replace IN with EXISTS", Impact::High)],
        ..Default::default()
    };
    let sections = compose(&result);
    let titles: Vec<_> = sections.categories.iter().map(|c| c.title).collect();
    assert_eq!(titles, ["Query Rewrites", "Suggested Indexes"]);
    assert!(sections.category(CategoryKind::Bottlenecks).is_none());
}

#[test]
fn test_ties_keep_base_order() {
    let result = AnalysisResult {
        statistics: vec![item("analyze orders", Impact::Medium)],
        materialized_views: vec![item("daily totals", Impact::Medium)],
        bottlenecks: vec![item("seq scan", Impact::Medium)],
        indexes: vec![item("btree on id", Impact::Medium)],
        ..Default::default()
    };
    assert_eq!(
        kinds(&result),
        [
            CategoryKind::Bottlenecks,
            CategoryKind::Indexes,
            CategoryKind::MaterializedViews,
            CategoryKind::Statistics
        ]
    );
}

#[test]
fn test_category_ordered_by_best_item_only() {
    // indexes hold more medium items, but statistics has the single high one
    let result = AnalysisResult {
        indexes: vec![
            item("i1", Impact::Medium),
            item("i2", Impact::Medium),
            item("i3", Impact::Medium),
        ],
        statistics: vec![item("s1", Impact::Low), item("s2", Impact::High)],
        ..Default::default()
    };
    let sections = compose(&result);
    assert_eq!(sections.categories[0].kind, CategoryKind::Statistics);
    let stats: Vec<_> = sections.categories[0]
        .items
        .iter()
        .map(|i| i.explanation.as_str())
        .collect();
    assert_eq!(stats, ["s2", "s1"]);
}

#[test]
fn test_unrecognized_only_category_sorts_after_known() {
    let result = AnalysisResult {
        bottlenecks: vec![item("odd", Impact::from("extreme"))],
        rewrites: vec![item("low one", Impact::Low)],
        ..Default::default()
    };
    assert_eq!(
        kinds(&result),
        [CategoryKind::Rewrites, CategoryKind::Bottlenecks]
    );
}

#[test]
fn test_no_empty_category_emitted() {
    let result = AnalysisResult {
        materialized_views: vec![item("mv", Impact::Low)],
        ..Default::default()
    };
    let sections = compose(&result);
    assert_eq!(sections.categories.len(), 1);
    assert!(sections.categories.iter().all(|c| !c.items.is_empty()));
}

#[test]
fn test_configuration_ranked_separately() {
    let result = AnalysisResult {
        rewrites: vec![item("r", Impact::Low)],
        configuration: vec![
            configuration("random_page_cost", Impact::Medium),
            configuration("work_mem", Impact::High),
        ],
        ..Default::default()
    };
    let sections = compose(&result);
    assert_eq!(sections.categories.len(), 1);
    let params: Vec<_> = sections
        .configuration
        .iter()
        .map(|c| c.parameter.as_str())
        .collect();
    assert_eq!(params, ["work_mem", "random_page_cost"]);
    assert_eq!(sections.suggestion_count(), 3);
}

#[test]
fn test_empty_result_is_no_suggestions() {
    let result = AnalysisResult {
        summary: "Query is already optimal".to_string(),
        ..Default::default()
    };
    assert!(result.is_empty());
    let sections = compose(&result);
    assert!(sections.is_empty());
    assert_eq!(sections.suggestion_count(), 0);
}

#[test]
fn test_configuration_only_is_not_empty() {
    let result = AnalysisResult {
        configuration: vec![configuration("work_mem", Impact::Low)],
        ..Default::default()
    };
    let sections = compose(&result);
    assert!(sections.categories.is_empty());
    assert!(!sections.is_empty());
}
