//! Suggestion aggregation and ranking.
//!
//! An [`AnalysisResult`] groups suggestions by kind (indexes, rewrites,
//! materialized views, bottlenecks, statistics) plus configuration changes.
//! This module turns it into an ordered render model:
//!
//! ```text
//! ┌────────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │ AnalysisResult │────▶│   compose    │────▶│ ComposedSections │
//! └────────────────┘     └──────────────┘     └──────────────────┘
//!                               │
//!                        ┌──────┴───────┐
//!                        │rank_by_impact│
//!                        └──────┬───────┘
//!                               │
//!                        ┌──────┴───────┐
//!                        │ Impact::rank │
//!                        └──────────────┘
//! ```
//!
//! # Impact Order
//!
//! `high` < `medium` < `low` < anything else. Unknown labels never fail; they
//! sort last.

mod decode;
mod impact;
mod ranker;
mod sections;
mod types;

pub use decode::{decode_analysis, strip_code_fence};
pub use impact::{Impact, UNRECOGNIZED_RANK, impact_rank};
pub use ranker::{Ranked, best_rank, rank_by_impact};
pub use sections::{Category, CategoryKind, ComposedSections, EMPTY_CATEGORY_RANK, compose};
pub use types::{AnalysisResult, ConfigurationItem, SuggestionItem};
