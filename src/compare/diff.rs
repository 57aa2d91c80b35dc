use super::types::{DiffOutcome, Row, RowDiff};

/// Compare two ordered row sequences.
///
/// Both sequences are first bounded to `row_limit` rows. Rows are then walked
/// in lock-step and compared structurally: same length, every value equal,
/// no type coercion (`1` and `"1"` differ). Row order is part of what is being
/// verified, so nothing is sorted.
///
/// The walk stops at the first differing row, which is reported with its
/// 1-based position. If every compared row matches but the sequences differ
/// in length, the results do not match and no `first_diff` is reported; the
/// row counts carry the mismatch.
///
/// # Example
///
/// ```
/// use optimizeql::compare::diff_rows;
/// use serde_json::json;
///
/// let original = vec![vec![json!(1), json!("a")], vec![json!(2), json!("b")]];
/// let rewritten = vec![vec![json!(1), json!("a")], vec![json!(3), json!("b")]];
///
/// let outcome = diff_rows(&original, &rewritten, 100);
/// assert!(!outcome.results_match);
/// assert_eq!(outcome.first_diff.unwrap().row_number, 2);
/// ```
pub fn diff_rows(original: &[Row], rewritten: &[Row], row_limit: usize) -> DiffOutcome {
    let original = &original[..original.len().min(row_limit)];
    let rewritten = &rewritten[..rewritten.len().min(row_limit)];
    let rows_compared = original.len().min(rewritten.len());

    let first_diff = original
        .iter()
        .zip(rewritten)
        .position(|(o, r)| o != r)
        .map(|idx| RowDiff {
            row_number:    idx + 1,
            original_row:  original[idx].clone(),
            rewritten_row: rewritten[idx].clone()
        });

    let results_match = first_diff.is_none() && original.len() == rewritten.len();

    DiffOutcome {
        results_match,
        rows_compared,
        original_row_count: original.len(),
        rewritten_row_count: rewritten.len(),
        first_diff
    }
}
