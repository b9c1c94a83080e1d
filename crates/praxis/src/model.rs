use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Practice,
    Behavior,
    Culture,
    Tooling,
}

/// A named practice in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

impl PracticeNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: Category::default(),
            description: String::new(),
            requirements: Vec::new(),
            benefits: Vec::new(),
        }
    }
}

/// `practice_id` requires `depends_on_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    #[serde(alias = "practiceId")]
    pub practice_id: String,
    #[serde(alias = "dependsOnId")]
    pub depends_on_id: String,
}

impl DependencyEdge {
    pub fn new(practice_id: impl Into<String>, depends_on_id: impl Into<String>) -> Self {
        Self {
            practice_id: practice_id.into(),
            depends_on_id: depends_on_id.into(),
        }
    }
}

/// Why a tree occurrence was not expanded further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchCut {
    /// The id already appears on the path from the root.
    Cycle,
    /// The occurrence sits at `max_depth` and still has dependencies.
    DepthLimit,
    /// The viewer collapsed this practice.
    Collapsed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub level: usize,
    pub children: Vec<TreeNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cut: Option<BranchCut>,
}

impl TreeNode {
    pub fn from_practice(practice: &PracticeNode, level: usize) -> Self {
        Self {
            id: practice.id.clone(),
            name: practice.name.clone(),
            category: practice.category,
            description: practice.description.clone(),
            requirements: practice.requirements.clone(),
            benefits: practice.benefits.clone(),
            level,
            children: Vec::new(),
            cut: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of occurrences in this subtree, including `self`.
    pub fn occurrence_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }

    /// Pre-order traversal.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a TreeNode)) {
        let mut stack: Vec<&TreeNode> = vec![self];
        while let Some(node) = stack.pop() {
            f(node);
            for child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }
}
