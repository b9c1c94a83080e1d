//! One recomputation per viewer event: tree, levels, ordering.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::levels::{LevelMap, flatten_to_levels};
use crate::options::LayoutOptions;
use crate::order::{cross_count, optimize_layer_ordering};
use crate::tree::build_tree_from_catalog_with_collapsed;
use rustc_hash::FxHashSet as HashSet;
use serde::Serialize;

/// What the viewer is looking at. Owned by the caller; the pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagramState {
    pub root_id: String,
    /// Practice ids whose dependencies are hidden, wherever they occur.
    pub collapsed: HashSet<String>,
}

impl DiagramState {
    pub fn new(root_id: impl Into<String>) -> Self {
        Self {
            root_id: root_id.into(),
            collapsed: HashSet::default(),
        }
    }

    /// Changing the root keeps the collapsed set.
    pub fn with_root(mut self, root_id: impl Into<String>) -> Self {
        self.root_id = root_id.into();
        self
    }

    /// Collapses `id` if expanded, expands it otherwise. Returns `true` when now collapsed.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.collapsed.remove(id) {
            false
        } else {
            self.collapsed.insert(id.to_string());
            true
        }
    }
}

/// The laid-out diagram. Diagnostics only cover occurrences the viewer can see: nothing below a
/// collapsed practice is reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramView {
    pub root_id: String,
    pub found: bool,
    pub levels: LevelMap,
    pub cycles_encountered: Vec<String>,
    pub depth_exceeded: Vec<String>,
    pub missing_dependencies: Vec<String>,
    /// Edge crossings left after ordering.
    pub crossings: usize,
}

pub fn render_view(
    catalog: &Catalog,
    state: &DiagramState,
    options: &LayoutOptions,
) -> Result<DiagramView> {
    let outcome = build_tree_from_catalog_with_collapsed(
        catalog,
        &state.root_id,
        options.max_depth,
        &state.collapsed,
    );
    let mut view = DiagramView {
        root_id: state.root_id.clone(),
        found: outcome.tree.is_some(),
        levels: LevelMap::default(),
        cycles_encountered: outcome.cycles_encountered,
        depth_exceeded: outcome.depth_exceeded,
        missing_dependencies: outcome.missing_dependencies,
        crossings: 0,
    };
    let Some(tree) = outcome.tree else {
        return Ok(view);
    };

    let levels = flatten_to_levels(&tree);
    let levels = optimize_layer_ordering(&levels, options.iterations)?;
    view.crossings = cross_count(&levels)?;
    view.levels = levels;

    tracing::debug!(
        root = %view.root_id,
        levels = view.levels.len(),
        occurrences = view.levels.occurrence_count(),
        crossings = view.crossings,
        "view recomputed"
    );
    Ok(view)
}
