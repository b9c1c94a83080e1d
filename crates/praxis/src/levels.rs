//! Depth levels of a practice tree.

use crate::model::TreeNode;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/// Identifies one tree occurrence within a [`LevelMap`].
///
/// The same practice id may occur several times (diamonds); occurrence ids never repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OccurrenceId(pub usize);

impl fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelEntry {
    pub occurrence: OccurrenceId,
    pub id: String,
    /// The occurrence one level above this one (`None` for the root).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<OccurrenceId>,
}

impl LevelEntry {
    pub fn new(occurrence: usize, id: impl Into<String>, parent: Option<usize>) -> Self {
        Self {
            occurrence: OccurrenceId(occurrence),
            id: id.into(),
            parent: parent.map(OccurrenceId),
        }
    }
}

/// `level → ordered entries`, contiguous from level 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct LevelMap {
    levels: Vec<Vec<LevelEntry>>,
}

impl LevelMap {
    /// Builds a map from explicit layers, kept exactly as given. Nothing is validated here;
    /// the layout functions in [`crate::order`] reject malformed maps.
    pub fn from_levels(levels: Vec<Vec<LevelEntry>>) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> &[Vec<LevelEntry>] {
        &self.levels
    }

    pub fn into_levels(self) -> Vec<Vec<LevelEntry>> {
        self.levels
    }

    pub fn level(&self, level: usize) -> Option<&[LevelEntry]> {
        self.levels.get(level).map(|v| v.as_slice())
    }

    /// Practice ids of a level in their current order.
    pub fn ids(&self, level: usize) -> Vec<&str> {
        self.level(level)
            .unwrap_or(&[])
            .iter()
            .map(|e| e.id.as_str())
            .collect()
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn max_level(&self) -> Option<usize> {
        self.levels.len().checked_sub(1)
    }

    pub fn occurrence_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }
}

/// Breadth-first flattening: the root is level 0, every child sits one level below its parent.
/// Entries keep first-encountered BFS order and occurrence ids are assigned in that order.
pub fn flatten_to_levels(tree: &TreeNode) -> LevelMap {
    let mut levels: Vec<Vec<LevelEntry>> = Vec::new();
    let mut next_occurrence: usize = 0;
    let mut queue: VecDeque<(&TreeNode, usize, Option<OccurrenceId>)> = VecDeque::new();
    queue.push_back((tree, 0, None));

    while let Some((node, level, parent)) = queue.pop_front() {
        let occurrence = OccurrenceId(next_occurrence);
        next_occurrence += 1;

        if levels.len() <= level {
            levels.resize_with(level + 1, Vec::new);
        }
        levels[level].push(LevelEntry {
            occurrence,
            id: node.id.clone(),
            parent,
        });

        for child in &node.children {
            queue.push_back((child, level + 1, Some(occurrence)));
        }
    }

    LevelMap { levels }
}
