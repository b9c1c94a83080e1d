use super::{LayerGraph, Positions};
use crate::error::Result;
use crate::levels::{LevelEntry, LevelMap};

/// Number of edge crossings between every pair of adjacent levels.
pub fn cross_count(level_map: &LevelMap) -> Result<usize> {
    LayerGraph::build(level_map)?;
    let levels = level_map.levels();
    let mut cc: usize = 0;
    for i in 1..levels.len() {
        cc += two_layer_cross_count(&levels[i - 1], &levels[i]);
    }
    Ok(cc)
}

fn two_layer_cross_count(north: &[LevelEntry], south: &[LevelEntry]) -> usize {
    if south.is_empty() {
        return 0;
    }

    let north_pos: Positions = north
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.occurrence, i))
        .collect();
    let mut edges: Vec<(usize, usize)> = south
        .iter()
        .enumerate()
        .filter_map(|(south_ix, entry)| {
            let parent = entry.parent?;
            let north_ix = *north_pos.get(&parent)?;
            Some((north_ix, south_ix))
        })
        .collect();
    edges.sort_unstable();

    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<usize> = vec![0; tree_size];

    let mut cc: usize = 0;
    for (_, south_ix) in edges {
        let mut index = south_ix + first_index;
        tree[index] += 1;
        let mut weight_sum: usize = 0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        cc += weight_sum;
    }

    cc
}
