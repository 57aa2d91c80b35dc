//! Section composition for rendering an analysis result.
//!
//! Suggestions are ordered on two levels:
//!
//! 1. Categories are ordered by the best impact found among their items, so
//!    the category holding the most actionable finding is shown first. Ties
//!    keep the base order (Bottlenecks, Suggested Indexes, Query Rewrites,
//!    Materialized Views, Statistics).
//! 2. Items inside a category are ranked by their own impact.
//!
//! Cross-category ordering only looks at each category's best item; the two
//! levels are never collapsed into one global sort.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::{
    ranker::{best_rank, rank_by_impact},
    types::{AnalysisResult, ConfigurationItem, SuggestionItem}
};

/// Rank given to an empty category, worse than any real impact rank.
pub const EMPTY_CATEGORY_RANK: u8 = 99;

/// Suggestion categories in base display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Bottlenecks,
    Indexes,
    Rewrites,
    MaterializedViews,
    Statistics
}

impl CategoryKind {
    /// All categories in base order
    pub const ALL: [Self; 5] = [
        Self::Bottlenecks,
        Self::Indexes,
        Self::Rewrites,
        Self::MaterializedViews,
        Self::Statistics
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Bottlenecks => "Bottlenecks",
            Self::Indexes => "Suggested Indexes",
            Self::Rewrites => "Query Rewrites",
            Self::MaterializedViews => "Materialized Views",
            Self::Statistics => "Statistics"
        }
    }

    /// Raw item sequence of this category in `result`
    pub fn items(self, result: &AnalysisResult) -> &[SuggestionItem] {
        match self {
            Self::Bottlenecks => &result.bottlenecks,
            Self::Indexes => &result.indexes,
            Self::Rewrites => &result.rewrites,
            Self::MaterializedViews => &result.materialized_views,
            Self::Statistics => &result.statistics
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A non-empty, ranked group of suggestions ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub kind:      CategoryKind,
    pub title:     &'static str,
    /// Best impact rank among `items`
    pub best_rank: u8,
    pub items:     Vec<SuggestionItem>
}

/// Render model produced from one analysis result.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ComposedSections {
    /// Non-empty categories, most impactful first
    pub categories:    Vec<Category>,
    /// Configuration changes ranked by impact, always rendered last
    pub configuration: Vec<ConfigurationItem>
}

impl ComposedSections {
    /// The "no suggestions" state: nothing to show in any section
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.configuration.is_empty()
    }

    /// Number of suggestions across all sections, configuration included
    pub fn suggestion_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum::<usize>() + self.configuration.len()
    }

    pub fn category(&self, kind: CategoryKind) -> Option<&Category> {
        self.categories.iter().find(|c| c.kind == kind)
    }
}

/// Compose the ordered render model for `result`.
///
/// Empty categories take part in category ordering (they rank
/// [`EMPTY_CATEGORY_RANK`] and sort last) and are dropped afterwards.
///
/// # Example
///
/// ```
/// use optimizeql::suggestions::{
///     AnalysisResult, CategoryKind, Impact, SuggestionItem, compose
/// };
///
/// let result = AnalysisResult {
///     indexes: vec![SuggestionItem::new("add index", Impact::Low)],
///     rewrites: vec![SuggestionItem::new("use EXISTS", Impact::High)],
///     ..Default::default()
/// };
/// let sections = compose(&result);
/// let kinds: Vec<_> = sections.categories.iter().map(|c| c.kind).collect();
/// assert_eq!(kinds, [CategoryKind::Rewrites, CategoryKind::Indexes]);
/// ```
pub fn compose(result: &AnalysisResult) -> ComposedSections {
    let mut candidates: Vec<(CategoryKind, u8)> = CategoryKind::ALL
        .iter()
        .map(|&kind| {
            let rank = best_rank(kind.items(result)).unwrap_or(EMPTY_CATEGORY_RANK);
            (kind, rank)
        })
        .collect();
    // stable: ties keep base order
    candidates.sort_by_key(|&(_, rank)| rank);
    debug!(
        query_id = %result.query_id,
        order = ?candidates,
        "ordered suggestion categories"
    );

    let categories = candidates
        .into_iter()
        .filter(|&(kind, _)| !kind.items(result).is_empty())
        .map(|(kind, best_rank)| Category {
            kind,
            title: kind.title(),
            best_rank,
            items: rank_by_impact(kind.items(result))
        })
        .collect();

    ComposedSections {
        categories,
        configuration: rank_by_impact(&result.configuration)
    }
}
