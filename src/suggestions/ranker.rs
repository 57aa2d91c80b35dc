use super::{
    impact::Impact,
    types::{ConfigurationItem, SuggestionItem}
};

/// Anything that carries an estimated impact and can be ordered by it.
pub trait Ranked {
    fn impact(&self) -> &Impact;
}

impl Ranked for SuggestionItem {
    fn impact(&self) -> &Impact {
        &self.estimated_impact
    }
}

impl Ranked for ConfigurationItem {
    fn impact(&self) -> &Impact {
        &self.estimated_impact
    }
}

/// Order items by impact, highest first.
///
/// The sort is stable: items sharing an impact level keep the order the
/// analysis emitted them in. The input is left untouched.
///
/// # Example
///
/// ```
/// use optimizeql::suggestions::{Impact, SuggestionItem, rank_by_impact};
///
/// let items = vec![
///     SuggestionItem::new("a", Impact::Low),
///     SuggestionItem::new("b", Impact::High),
///     SuggestionItem::new("c", Impact::Low)
/// ];
/// let ranked = rank_by_impact(&items);
/// let order: Vec<_> = ranked.iter().map(|i| i.explanation.as_str()).collect();
/// assert_eq!(order, ["b", "a", "c"]);
/// ```
pub fn rank_by_impact<T: Ranked + Clone>(items: &[T]) -> Vec<T> {
    let mut ranked = items.to_vec();
    ranked.sort_by_key(|item| item.impact().rank());
    ranked
}

/// Best (lowest) impact rank among `items`, `None` when empty
pub fn best_rank<T: Ranked>(items: &[T]) -> Option<u8> {
    items.iter().map(|item| item.impact().rank()).min()
}
