//! In-memory snapshot of the practice catalog.
//!
//! The snapshot is the only input shared between pipeline stages. It is built once per view
//! session and never mutated afterwards.

use crate::error::{Error, Result};
use crate::model::{DependencyEdge, PracticeNode};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::{Deserialize, Serialize};

const SEED_CATALOG_JSON: &str = include_str!("../data/seed_catalog.json");

pub const SEED_ROOT_ID: &str = "continuous-delivery";

pub type NodesById = IndexMap<String, PracticeNode>;
pub type EdgesByParent = HashMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub practices: Vec<PracticeNode>,
    #[serde(default, alias = "edges")]
    pub dependencies: Vec<DependencyEdge>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    nodes_by_id: NodesById,
    edges: Vec<DependencyEdge>,
    edges_by_parent: EdgesByParent,
}

impl Catalog {
    pub fn new(nodes: Vec<PracticeNode>, edges: Vec<DependencyEdge>) -> Result<Self> {
        let mut nodes_by_id: NodesById = IndexMap::with_capacity(nodes.len());
        for node in nodes {
            if nodes_by_id.contains_key(&node.id) {
                return Err(Error::DuplicatePractice { id: node.id });
            }
            nodes_by_id.insert(node.id.clone(), node);
        }

        let mut seen: HashSet<DependencyEdge> = HashSet::default();
        let mut kept: Vec<DependencyEdge> = Vec::with_capacity(edges.len());
        let mut edges_by_parent: EdgesByParent = HashMap::default();
        for edge in edges {
            if !seen.insert(edge.clone()) {
                continue;
            }
            for endpoint in [&edge.practice_id, &edge.depends_on_id] {
                if !nodes_by_id.contains_key(endpoint) {
                    tracing::warn!(
                        practice = %edge.practice_id,
                        depends_on = %edge.depends_on_id,
                        missing = %endpoint,
                        "dependency edge references an unknown practice"
                    );
                }
            }
            edges_by_parent
                .entry(edge.practice_id.clone())
                .or_default()
                .push(edge.depends_on_id.clone());
            kept.push(edge);
        }

        tracing::debug!(
            practices = nodes_by_id.len(),
            edges = kept.len(),
            "catalog snapshot loaded"
        );

        Ok(Self {
            nodes_by_id,
            edges: kept,
            edges_by_parent,
        })
    }

    pub fn from_file(file: CatalogFile) -> Result<Self> {
        Self::new(file.practices, file.dependencies)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(text)?;
        Self::from_file(file)
    }

    /// The bundled continuous-delivery catalog (23 practices, rooted at [`SEED_ROOT_ID`]).
    pub fn seed() -> Result<Self> {
        Self::from_json(SEED_CATALOG_JSON)
    }

    pub fn get_all_nodes(&self) -> Vec<PracticeNode> {
        self.nodes_by_id.values().cloned().collect()
    }

    pub fn get_all_edges(&self) -> Vec<DependencyEdge> {
        self.edges.clone()
    }

    pub fn nodes_by_id(&self) -> &NodesById {
        &self.nodes_by_id
    }

    pub fn edges_by_parent(&self) -> &EdgesByParent {
        &self.edges_by_parent
    }

    pub fn node(&self, id: &str) -> Option<&PracticeNode> {
        self.nodes_by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes_by_id.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes_by_id.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Direct dependencies of `id`, in edge order.
    pub fn dependencies_of(&self, id: &str) -> &[String] {
        self.edges_by_parent
            .get(id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Practices that list `id` as a dependency, in edge order.
    pub fn dependents_of(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.depends_on_id == id)
            .map(|e| e.practice_id.as_str())
            .collect()
    }

    pub fn fan_in(&self, id: &str) -> usize {
        self.dependents_of(id).len()
    }

    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            practices: self.get_all_nodes(),
            dependencies: self.get_all_edges(),
        }
    }
}
