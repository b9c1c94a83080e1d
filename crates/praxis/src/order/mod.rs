//! Within-level ordering via iterated barycenter sweeps.
//!
//! Structured after Dagre's `order` phase: a layer graph is indexed once, then layers are
//! re-sorted top-down against their parents and bottom-up against their children.

mod barycenter;
mod cross_count;
mod layer_graph;
mod ordering;

pub use barycenter::{BarycenterEntry, barycenter, sort};
pub use cross_count::cross_count;
pub use layer_graph::{Adjacency, LayerGraph, Positions, positions_of};
pub use ordering::{DEFAULT_ITERATIONS, optimize_layer_ordering};

/// Which adjacent level a sweep measures barycenters against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Parents in the level above (top-down sweep).
    InEdges,
    /// Children in the level below (bottom-up sweep).
    OutEdges,
}
