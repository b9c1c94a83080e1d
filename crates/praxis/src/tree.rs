//! Cycle-safe tree construction over the dependency adjacency list.
//!
//! Every root-to-node path yields its own [`TreeNode`], so diamond dependencies render once per
//! parent. Cycles are guarded by a visited set that belongs to the current branch only: a
//! sibling never sees ids added below another sibling.

use crate::catalog::{Catalog, EdgesByParent, NodesById};
use crate::model::{BranchCut, PracticeNode, TreeNode};
use rustc_hash::FxHashSet as HashSet;
use serde::Serialize;

pub const DEFAULT_MAX_DEPTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BuildOutcome {
    /// `None` when the root id is not in the catalog.
    pub tree: Option<TreeNode>,
    /// Ids that closed a cycle; each was added once more as a terminal leaf.
    pub cycles_encountered: Vec<String>,
    /// Ids whose dependencies were dropped because they sit at `max_depth`.
    pub depth_exceeded: Vec<String>,
    /// Dependency ids that have no practice in the catalog.
    pub missing_dependencies: Vec<String>,
}

impl BuildOutcome {
    pub fn is_found(&self) -> bool {
        self.tree.is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.cycles_encountered.is_empty()
            && self.depth_exceeded.is_empty()
            && self.missing_dependencies.is_empty()
    }
}

pub fn build_tree(
    root_id: &str,
    nodes_by_id: &NodesById,
    edges_by_parent: &EdgesByParent,
    max_depth: usize,
) -> BuildOutcome {
    build_tree_with_collapsed(
        root_id,
        nodes_by_id,
        edges_by_parent,
        max_depth,
        &HashSet::default(),
    )
}

/// Like [`build_tree`], but occurrences whose id is in `collapsed` are not expanded: they get
/// `cut = Some(Collapsed)`, and nothing below them is reported in the outcome.
pub fn build_tree_with_collapsed(
    root_id: &str,
    nodes_by_id: &NodesById,
    edges_by_parent: &EdgesByParent,
    max_depth: usize,
    collapsed: &HashSet<String>,
) -> BuildOutcome {
    let Some(root) = nodes_by_id.get(root_id) else {
        tracing::debug!(root = root_id, "root practice not found");
        return BuildOutcome::default();
    };

    let mut builder = Builder {
        nodes_by_id,
        edges_by_parent,
        max_depth,
        collapsed,
        outcome: BuildOutcome::default(),
    };
    let tree = builder.expand(root, 0, &HashSet::default());
    let mut outcome = builder.outcome;
    outcome.tree = Some(tree);
    outcome
}

pub fn build_tree_from_catalog(catalog: &Catalog, root_id: &str, max_depth: usize) -> BuildOutcome {
    build_tree(
        root_id,
        catalog.nodes_by_id(),
        catalog.edges_by_parent(),
        max_depth,
    )
}

pub fn build_tree_from_catalog_with_collapsed(
    catalog: &Catalog,
    root_id: &str,
    max_depth: usize,
    collapsed: &HashSet<String>,
) -> BuildOutcome {
    build_tree_with_collapsed(
        root_id,
        catalog.nodes_by_id(),
        catalog.edges_by_parent(),
        max_depth,
        collapsed,
    )
}

struct Builder<'a> {
    nodes_by_id: &'a NodesById,
    edges_by_parent: &'a EdgesByParent,
    max_depth: usize,
    collapsed: &'a HashSet<String>,
    outcome: BuildOutcome,
}

impl<'a> Builder<'a> {
    fn expand(
        &mut self,
        practice: &'a PracticeNode,
        level: usize,
        parent_visited: &HashSet<&'a str>,
    ) -> TreeNode {
        let nodes_by_id: &'a NodesById = self.nodes_by_id;
        let edges_by_parent: &'a EdgesByParent = self.edges_by_parent;
        let mut node = TreeNode::from_practice(practice, level);
        let child_ids: &'a [String] = edges_by_parent
            .get(&practice.id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        if child_ids.is_empty() {
            return node;
        }

        if self.collapsed.contains(&practice.id) {
            node.cut = Some(BranchCut::Collapsed);
            return node;
        }

        if level >= self.max_depth {
            tracing::debug!(
                id = %practice.id,
                level,
                max_depth = self.max_depth,
                "branch truncated at depth limit"
            );
            self.outcome.depth_exceeded.push(practice.id.clone());
            node.cut = Some(BranchCut::DepthLimit);
            return node;
        }

        let mut visited = parent_visited.clone();
        visited.insert(practice.id.as_str());

        for child_id in child_ids {
            let Some(child) = nodes_by_id.get(child_id) else {
                tracing::debug!(parent = %practice.id, child = %child_id, "dependency not in catalog");
                self.outcome.missing_dependencies.push(child_id.clone());
                continue;
            };

            if visited.contains(child_id.as_str()) {
                tracing::debug!(parent = %practice.id, child = %child_id, "cycle closed");
                self.outcome.cycles_encountered.push(child_id.clone());
                let mut leaf = TreeNode::from_practice(child, level + 1);
                leaf.cut = Some(BranchCut::Cycle);
                node.children.push(leaf);
                continue;
            }

            let subtree = self.expand(child, level + 1, &visited);
            node.children.push(subtree);
        }
        node
    }
}
