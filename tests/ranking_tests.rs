// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use optimizeql::suggestions::{
    ConfigurationItem, Impact, SuggestionItem, UNRECOGNIZED_RANK, best_rank, impact_rank,
    rank_by_impact
};

fn item(explanation: &str, impact: &str) -> SuggestionItem {
    SuggestionItem::new(explanation, Impact::from(impact))
}

fn explanations(items: &[SuggestionItem]) -> Vec<&str> {
    items.iter().map(|i| i.explanation.as_str()).collect()
}

#[test]
fn test_impact_rank_order() {
    assert!(impact_rank(Some("high")) < impact_rank(Some("medium")));
    assert!(impact_rank(Some("medium")) < impact_rank(Some("low")));
    assert!(impact_rank(Some("low")) < impact_rank(Some("unknown")));
}

#[test]
fn test_unrecognized_labels_rank_last() {
    for label in ["", "critical", "HIGH", "Medium", " low"] {
        assert_eq!(impact_rank(Some(label)), UNRECOGNIZED_RANK, "label {:?}", label);
    }
    assert_eq!(impact_rank(None), UNRECOGNIZED_RANK);
}

#[test]
fn test_impact_display() {
    assert_eq!(Impact::High.to_string(), "high");
    assert_eq!(Impact::from("severe").to_string(), "severe");
    assert_eq!(Impact::from("severe").badge(), "Unrated");
}

#[test]
fn test_rank_empty() {
    let ranked = rank_by_impact::<SuggestionItem>(&[]);
    assert!(ranked.is_empty());
}

#[test]
fn test_rank_orders_by_impact() {
    let items = vec![
        item("a", "low"),
        item("b", "high"),
        item("c", "bogus"),
        item("d", "medium"),
    ];
    let ranked = rank_by_impact(&items);
    assert_eq!(explanations(&ranked), ["b", "d", "a", "c"]);
}

#[test]
fn test_rank_is_stable() {
    let items = vec![
        item("m1", "medium"),
        item("h1", "high"),
        item("m2", "medium"),
        item("h2", "high"),
        item("m3", "medium"),
    ];
    let ranked = rank_by_impact(&items);
    assert_eq!(explanations(&ranked), ["h1", "h2", "m1", "m2", "m3"]);
}

#[test]
fn test_rank_does_not_mutate_input() {
    let items = vec![item("a", "low"), item("b", "high")];
    let before = items.clone();
    let _ = rank_by_impact(&items);
    assert_eq!(items, before);
}

#[test]
fn test_rank_configuration_items() {
    let config = |parameter: &str, impact: Impact| ConfigurationItem {
        parameter:         parameter.to_string(),
        current_value:     "4MB".to_string(),
        recommended_value: "64MB".to_string(),
        explanation:       String::new(),
        estimated_impact:  impact
    };
    let items = vec![
        config("work_mem", Impact::Low),
        config("shared_buffers", Impact::High),
        config("effective_cache_size", Impact::Low),
    ];
    let ranked = rank_by_impact(&items);
    let parameters: Vec<_> = ranked.iter().map(|c| c.parameter.as_str()).collect();
    assert_eq!(
        parameters,
        ["shared_buffers", "work_mem", "effective_cache_size"]
    );
}

#[test]
fn test_best_rank() {
    assert_eq!(best_rank::<SuggestionItem>(&[]), None);
    let items = vec![item("a", "low"), item("b", "medium")];
    assert_eq!(best_rank(&items), Some(1));
}
