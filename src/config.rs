//! Graph construction configuration.

use serde::{Deserialize, Serialize};

use crate::types::NODE_CEILING;

/// What happens when input would grow a graph past its node capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Fail with [`GraphError::CapacityExceeded`](crate::types::GraphError::CapacityExceeded).
    #[default]
    Reject,
    /// Drop the overflowing connection and everything after it, keep the rest.
    Truncate,
}

/// Construction-time limits for a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Maximum number of nodes the graph accepts.
    pub node_capacity: usize,

    /// Overflow handling.
    pub overflow: OverflowPolicy,
}

impl GraphConfig {
    /// Default policy with a custom node capacity.
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            node_capacity: node_capacity.min(NODE_CEILING),
            ..Self::default()
        }
    }

    /// Switch to silent truncation on overflow.
    pub fn truncating(mut self) -> Self {
        self.overflow = OverflowPolicy::Truncate;
        self
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_capacity: NODE_CEILING,
            overflow: OverflowPolicy::Reject,
        }
    }
}
