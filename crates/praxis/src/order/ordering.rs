use super::{Adjacency, LayerGraph, Positions, Relationship, barycenter, positions_of, sort};
use crate::error::Result;
use crate::levels::{LevelEntry, LevelMap, OccurrenceId};
use rustc_hash::FxHashMap as HashMap;

pub const DEFAULT_ITERATIONS: usize = 3;

/// Reorders every level of `level_map` with `iterations` rounds of barycenter sweeps.
///
/// Each round runs a top-down sweep (levels `1..=max`, against parents) followed by a
/// bottom-up sweep (levels `max-1..=0`, against children). A level is sorted against the
/// current positions of its reference level, which already reflect earlier levels of the same
/// sweep. The result is a permutation of each input level; the input is left untouched.
///
/// Fails when a parent link points at an unknown occurrence, an occurrence repeats, or a link
/// skips a level.
pub fn optimize_layer_ordering(level_map: &LevelMap, iterations: usize) -> Result<LevelMap> {
    let graph = LayerGraph::build(level_map)?;
    let mut layers: Vec<Vec<LevelEntry>> = level_map.levels().to_vec();
    if layers.len() < 2 || iterations == 0 {
        return Ok(LevelMap::from_levels(layers));
    }

    let max_level = layers.len() - 1;
    let mut positions = positions_of(&layers);
    for iteration in 0..iterations {
        for level in 1..=max_level {
            sweep_layer(
                &mut layers[level],
                graph.neighbours(Relationship::InEdges),
                &mut positions,
            );
        }
        positions = positions_of(&layers);

        for level in (0..max_level).rev() {
            sweep_layer(
                &mut layers[level],
                graph.neighbours(Relationship::OutEdges),
                &mut positions,
            );
        }
        positions = positions_of(&layers);

        tracing::trace!(iteration, levels = layers.len(), "barycenter sweeps done");
    }

    Ok(LevelMap::from_levels(layers))
}

fn sweep_layer(layer: &mut Vec<LevelEntry>, neighbours: &Adjacency, positions: &mut Positions) {
    if layer.len() < 2 {
        return;
    }

    let movable: Vec<OccurrenceId> = layer.iter().map(|e| e.occurrence).collect();
    let entries = barycenter(&movable, neighbours, positions);
    let order = sort(&entries);

    let mut by_occurrence: HashMap<OccurrenceId, LevelEntry> =
        layer.drain(..).map(|e| (e.occurrence, e)).collect();
    for v in order {
        if let Some(entry) = by_occurrence.remove(&v) {
            layer.push(entry);
        }
    }

    for (i, entry) in layer.iter().enumerate() {
        positions.insert(entry.occurrence, i);
    }
}
