#![forbid(unsafe_code)]

//! Layered practice dependency diagrams.
//!
//! A catalog of practices with "depends-on" edges is turned into a cycle-safe tree rooted at a
//! chosen practice, grouped into depth levels, and ordered within each level by barycenter
//! sweeps to reduce edge crossings. Every stage is a pure function of the previous one.

pub mod adoption;
pub mod catalog;
pub mod error;
pub mod levels;
pub mod model;
pub mod options;
pub mod order;
pub mod pipeline;
pub mod tree;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use adoption::{AdoptionStats, compute_adoption_stats};
pub use catalog::{Catalog, CatalogFile, SEED_ROOT_ID};
pub use error::{Error, Result};
pub use levels::{LevelEntry, LevelMap, OccurrenceId, flatten_to_levels};
pub use model::{BranchCut, Category, DependencyEdge, PracticeNode, TreeNode};
pub use options::LayoutOptions;
pub use order::{DEFAULT_ITERATIONS, cross_count, optimize_layer_ordering};
pub use pipeline::{DiagramState, DiagramView, render_view};
pub use tree::{
    BuildOutcome, DEFAULT_MAX_DEPTH, build_tree, build_tree_from_catalog,
    build_tree_from_catalog_with_collapsed, build_tree_with_collapsed,
};
