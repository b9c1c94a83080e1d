//! Adoption counts over a practice tree.
//!
//! Counting is over distinct practice ids: a practice reached through two parents is one
//! practice to adopt. `percentage` is an integer rounded half up, `0` for an empty tree.

use crate::model::TreeNode;
use rustc_hash::FxHashSet as HashSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AdoptionStats {
    pub adopted_count: usize,
    pub total_count: usize,
    pub percentage: u32,
}

/// Counts the distinct practice ids in `tree` and how many of them are in `adopted_ids`.
///
/// Both counts are over ids, not occurrences: a diamond dependency that appears twice in the
/// tree adds one to `total_count`, and at most one to `adopted_count`.
pub fn compute_adoption_stats(tree: &TreeNode, adopted_ids: &HashSet<String>) -> AdoptionStats {
    let mut distinct: HashSet<&str> = HashSet::default();
    tree.walk(&mut |node| {
        distinct.insert(node.id.as_str());
    });

    let total_count = distinct.len();
    let adopted_count = distinct
        .iter()
        .filter(|id| adopted_ids.contains(**id))
        .count();

    AdoptionStats {
        adopted_count,
        total_count,
        percentage: round_half_up_percentage(adopted_count, total_count),
    }
}

fn round_half_up_percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (part * 100 + total / 2) / total;
    u32::try_from(pct).unwrap_or(u32::MAX)
}

/// Parses a comma-separated id list; blanks are ignored.
pub fn parse_adopted_ids(text: &str) -> HashSet<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`parse_adopted_ids`], sorted for stable output.
pub fn format_adopted_ids(ids: &HashSet<String>) -> String {
    let mut sorted: Vec<&str> = ids.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(",")
}
