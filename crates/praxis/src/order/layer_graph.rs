use super::Relationship;
use crate::error::{Error, Result};
use crate::levels::{LevelEntry, LevelMap, OccurrenceId};
use rustc_hash::FxHashMap as HashMap;

pub type Adjacency = HashMap<OccurrenceId, Vec<OccurrenceId>>;
pub type Positions = HashMap<OccurrenceId, usize>;

/// Validated edge index of a [`LevelMap`].
#[derive(Debug, Clone, Default)]
pub struct LayerGraph {
    level_of: HashMap<OccurrenceId, usize>,
    parents: Adjacency,
    children: Adjacency,
}

impl LayerGraph {
    /// Indexes parent/child links, failing on empty levels and on links that do not join
    /// adjacent levels.
    pub fn build(level_map: &LevelMap) -> Result<Self> {
        let mut graph = Self::default();

        for (level, entries) in level_map.levels().iter().enumerate() {
            if entries.is_empty() {
                return Err(Error::EmptyLevel { level });
            }
            for entry in entries {
                if graph.level_of.insert(entry.occurrence, level).is_some() {
                    return Err(Error::DuplicateOccurrence {
                        occurrence: entry.occurrence,
                        id: entry.id.clone(),
                    });
                }
            }
        }

        for (level, entries) in level_map.levels().iter().enumerate() {
            for entry in entries {
                let Some(parent) = entry.parent else {
                    continue;
                };
                let Some(&parent_level) = graph.level_of.get(&parent) else {
                    return Err(Error::UnknownOccurrence {
                        level,
                        id: entry.id.clone(),
                        occurrence: entry.occurrence,
                        parent,
                    });
                };
                if parent_level + 1 != level {
                    return Err(Error::NonAdjacentEdge {
                        id: entry.id.clone(),
                        occurrence: entry.occurrence,
                        level,
                        parent,
                        parent_level,
                    });
                }
                graph
                    .parents
                    .entry(entry.occurrence)
                    .or_default()
                    .push(parent);
                graph
                    .children
                    .entry(parent)
                    .or_default()
                    .push(entry.occurrence);
            }
        }

        Ok(graph)
    }

    pub fn neighbours(&self, relationship: Relationship) -> &Adjacency {
        match relationship {
            Relationship::InEdges => &self.parents,
            Relationship::OutEdges => &self.children,
        }
    }

    pub fn level_of(&self, occurrence: OccurrenceId) -> Option<usize> {
        self.level_of.get(&occurrence).copied()
    }

    pub fn edge_count(&self) -> usize {
        self.parents.values().map(Vec::len).sum()
    }
}

/// Index of every occurrence within its own level.
pub fn positions_of(levels: &[Vec<LevelEntry>]) -> Positions {
    let mut positions: Positions = HashMap::default();
    for layer in levels {
        for (i, entry) in layer.iter().enumerate() {
            positions.insert(entry.occurrence, i);
        }
    }
    positions
}
