//! Barycenter computation and the stable per-layer sort.

use super::{Adjacency, Positions};
use crate::levels::OccurrenceId;

#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub occurrence: OccurrenceId,
    /// Mean position of the connected neighbours; `None` when there are none.
    pub barycenter: Option<f64>,
    pub weight: usize,
}

/// Neighbours missing from `positions` do not contribute.
pub fn barycenter(
    movable: &[OccurrenceId],
    neighbours: &Adjacency,
    positions: &Positions,
) -> Vec<BarycenterEntry> {
    movable
        .iter()
        .map(|&v| {
            let mut sum: f64 = 0.0;
            let mut weight: usize = 0;
            for u in neighbours.get(&v).map(|n| n.as_slice()).unwrap_or(&[]) {
                let Some(&pos) = positions.get(u) else {
                    continue;
                };
                sum += pos as f64;
                weight += 1;
            }
            BarycenterEntry {
                occurrence: v,
                barycenter: (weight > 0).then(|| sum / weight as f64),
                weight,
            }
        })
        .collect()
}

/// Orders a layer by ascending barycenter.
///
/// Entries without a barycenter stay in their slot. The others are stably sorted into the
/// remaining slots, so equal barycenters keep their previous relative order.
pub fn sort(entries: &[BarycenterEntry]) -> Vec<OccurrenceId> {
    let mut sortable: Vec<(f64, OccurrenceId)> = entries
        .iter()
        .filter_map(|e| e.barycenter.map(|bc| (bc, e.occurrence)))
        .collect();
    sortable.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut sorted = sortable.into_iter().map(|(_, v)| v);
    let mut out: Vec<OccurrenceId> = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.barycenter.is_none() {
            out.push(entry.occurrence);
        } else if let Some(v) = sorted.next() {
            out.push(v);
        }
    }
    out
}
