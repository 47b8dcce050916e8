//! Connection descriptors: the reporting view of directed edges.

use serde::{Deserialize, Serialize};

use super::Identity;

/// A directed connection `from -> to` with an 8-bit priority.
///
/// Descriptors are derived data. The adjacency lists held by the nodes are
/// authoritative; a graph's descriptor list is only rebuilt by
/// [`Graph::optimize_connections`](crate::graph::Graph::optimize_connections).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    /// Source identity.
    pub from: Identity,
    /// Target identity.
    pub to: Identity,
    /// Caller-defined priority (0 when unassigned).
    #[serde(default)]
    pub priority: u8,
}

impl ConnectionDescriptor {
    /// Create a descriptor with priority 0.
    pub fn new(from: Identity, to: Identity) -> Self {
        Self {
            from,
            to,
            priority: 0,
        }
    }

    /// Create a descriptor with an explicit priority.
    pub fn with_priority(from: Identity, to: Identity, priority: u8) -> Self {
        Self { from, to, priority }
    }
}

impl From<(Identity, Identity)> for ConnectionDescriptor {
    fn from((from, to): (Identity, Identity)) -> Self {
        Self::new(from, to)
    }
}

impl From<(Identity, Identity, u8)> for ConnectionDescriptor {
    fn from((from, to, priority): (Identity, Identity, u8)) -> Self {
        Self::with_priority(from, to, priority)
    }
}

impl std::fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}:{}", self.from, self.to, self.priority)
    }
}
