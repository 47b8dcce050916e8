//! Graph nodes and the handles that address them.

use super::Identity;

/// Stable position of a node inside its graph's storage.
///
/// Handles follow insertion order and never change for the lifetime of the
/// graph, since nodes are never removed individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub(crate) usize);

impl NodeHandle {
    /// Storage position this handle points at.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One vertex: identity, payload, and its outbound/inbound adjacency.
///
/// The lists only change through the graph's edge operations, which keep
/// `b in a.outbound <=> a in b.inbound`.
#[derive(Debug, Clone)]
pub struct Node<V> {
    pub(crate) id: Identity,
    pub(crate) value: V,
    pub(crate) outbound: Vec<NodeHandle>,
    pub(crate) inbound: Vec<NodeHandle>,
}

impl<V> Node<V> {
    pub(crate) fn new(id: Identity, value: V) -> Self {
        Self {
            id,
            value,
            outbound: Vec::new(),
            inbound: Vec::new(),
        }
    }

    /// The node's identity.
    pub fn id(&self) -> Identity {
        self.id
    }

    /// The stored payload.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Mutable access to the stored payload.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Outgoing connections, in establishment order.
    pub fn outbound(&self) -> &[NodeHandle] {
        &self.outbound
    }

    /// Registered incoming connections.
    pub fn inbound(&self) -> &[NodeHandle] {
        &self.inbound
    }

    /// Number of outgoing connections.
    pub fn out_degree(&self) -> usize {
        self.outbound.len()
    }

    /// Number of incoming connections.
    pub fn in_degree(&self) -> usize {
        self.inbound.len()
    }

    /// Outbound neighbor at `position`, or `None` if out of range.
    pub fn neighbor_at(&self, position: usize) -> Option<NodeHandle> {
        self.outbound.get(position).copied()
    }
}
