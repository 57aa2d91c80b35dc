//! Impact classification for suggestion ordering.
//!
//! Every suggestion carries an estimated impact label. The label maps onto a
//! total order used by the ranker and the section composer:
//!
//! | Label | Rank |
//! |-------|------|
//! | `high` | 0 |
//! | `medium` | 1 |
//! | `low` | 2 |
//! | anything else, or absent | 3 |

use std::fmt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rank assigned to labels outside the known vocabulary.
pub const UNRECOGNIZED_RANK: u8 = 3;

/// Estimated impact of a suggestion.
///
/// Unknown labels are preserved verbatim in [`Impact::Unrecognized`] so they
/// survive a decode/encode cycle while still sorting after every known level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<Value>", into = "String")]
pub enum Impact {
    High,
    Medium,
    Low,
    Unrecognized(CompactString)
}

impl Impact {
    /// Position of this impact in the display order (lower comes first)
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
            Self::Unrecognized(_) => UNRECOGNIZED_RANK
        }
    }

    /// Label shown on the impact badge
    pub fn badge(&self) -> &'static str {
        match self {
            Self::High => "High impact",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unrecognized(_) => "Unrated"
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unrecognized(label) => label.as_str()
        }
    }
}

impl Default for Impact {
    fn default() -> Self {
        Self::Unrecognized(CompactString::default())
    }
}

impl From<&str> for Impact {
    fn from(label: &str) -> Self {
        match label {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            other => Self::Unrecognized(other.into())
        }
    }
}

impl From<String> for Impact {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

/// Labels that are not JSON strings (numbers, booleans, arrays) are kept as
/// their JSON text and rank as unrecognized.
impl From<Option<Value>> for Impact {
    fn from(label: Option<Value>) -> Self {
        match label {
            None | Some(Value::Null) => Self::default(),
            Some(Value::String(label)) => Self::from(label),
            Some(other) => Self::Unrecognized(other.to_string().into())
        }
    }
}

impl From<Impact> for String {
    fn from(impact: Impact) -> Self {
        impact.as_str().to_string()
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank a raw impact label.
///
/// Total over its domain: absent and unrecognized labels both rank as
/// [`UNRECOGNIZED_RANK`]. Matching is exact, so `"High"` is unrecognized.
///
/// # Example
///
/// ```
/// use optimizeql::suggestions::impact_rank;
///
/// assert_eq!(impact_rank(Some("high")), 0);
/// assert_eq!(impact_rank(Some("critical")), 3);
/// assert_eq!(impact_rank(None), 3);
/// ```
pub fn impact_rank(label: Option<&str>) -> u8 {
    label.map_or(UNRECOGNIZED_RANK, |l| Impact::from(l).rank())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_round_trip_through_string() {
        for label in ["high", "medium", "low"] {
            let impact = Impact::from(label);
            assert_eq!(String::from(impact), label);
        }
    }

    #[test]
    fn test_unrecognized_label_is_preserved() {
        let impact = Impact::from("critical");
        assert_eq!(impact.as_str(), "critical");
        assert_eq!(impact.rank(), UNRECOGNIZED_RANK);
    }

    #[test]
    fn test_non_string_label_is_unrecognized() {
        let impact: Impact = serde_json::from_str("2").unwrap();
        assert_eq!(impact, Impact::Unrecognized("2".into()));
        let impact: Impact = serde_json::from_str(r#"["high"]"#).unwrap();
        assert_eq!(impact.rank(), UNRECOGNIZED_RANK);
        let impact: Impact = serde_json::from_str("null").unwrap();
        assert_eq!(impact, Impact::default());
    }

    #[test]
    fn test_default_is_unrecognized() {
        assert_eq!(Impact::default().rank(), UNRECOGNIZED_RANK);
    }
}
