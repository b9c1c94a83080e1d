use crate::error::Result;
use crate::order::DEFAULT_ITERATIONS;
use crate::tree::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Deepest tree level that may still be expanded.
    pub max_depth: usize,
    /// Rounds of top-down + bottom-up barycenter sweeps.
    pub iterations: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl LayoutOptions {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
