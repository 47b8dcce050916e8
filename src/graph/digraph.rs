//! Core graph structure: a node arena with identity lookup and cached reports.

use crate::config::{GraphConfig, OverflowPolicy};
use crate::types::{
    is_reserved, ConnectionDescriptor, GraphError, GraphResult, Identity, Node, NodeHandle,
};

use super::traversal;

/// A directed graph owning all of its nodes.
///
/// Storage order is insertion order and is independent of identity values.
/// `connections` and `degrees` are derived views: they go stale as soon as
/// edges are established or severed directly, and are refreshed by
/// [`optimize_connections`](Self::optimize_connections) and
/// [`compute_degrees`](Self::compute_degrees) respectively.
#[derive(Debug, Clone)]
pub struct Graph<V> {
    /// All nodes, in storage order.
    nodes: Vec<Node<V>>,
    /// Identity of each node, aligned with `nodes`.
    identities: Vec<Identity>,
    /// Last computed connection list.
    connections: Vec<ConnectionDescriptor>,
    /// Out-degree of each node, aligned with `nodes`.
    degrees: Vec<usize>,
    config: GraphConfig,
}

impl<V> Graph<V> {
    /// Create an empty graph with the default configuration.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create an empty graph with the given configuration.
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            nodes: Vec::new(),
            identities: Vec::new(),
            connections: Vec::new(),
            degrees: Vec::new(),
            config,
        }
    }

    /// Build a graph from a literal connection list, every node carrying `default`.
    ///
    /// Endpoints are created on first reference. Descriptors are recorded
    /// verbatim, duplicates included.
    pub fn from_connections<I, C>(default: V, descriptors: I) -> GraphResult<Self>
    where
        V: Clone,
        I: IntoIterator<Item = C>,
        C: Into<ConnectionDescriptor>,
    {
        Self::from_connections_with_config(default, descriptors, GraphConfig::default())
    }

    /// Same as [`from_connections`](Self::from_connections) with explicit limits.
    pub fn from_connections_with_config<I, C>(
        default: V,
        descriptors: I,
        config: GraphConfig,
    ) -> GraphResult<Self>
    where
        V: Clone,
        I: IntoIterator<Item = C>,
        C: Into<ConnectionDescriptor>,
    {
        let mut graph = Self::with_config(config);

        for descriptor in descriptors {
            let descriptor = descriptor.into();
            for id in [descriptor.from, descriptor.to] {
                if is_reserved(id) {
                    return Err(GraphError::ReservedIdentity(id));
                }
            }

            let from_pos = graph.position_of(descriptor.from);
            let to_pos = graph.position_of(descriptor.to);
            let mut missing = usize::from(from_pos.is_none());
            if to_pos.is_none() && descriptor.to != descriptor.from {
                missing += 1;
            }
            if graph.nodes.len() + missing > graph.config.node_capacity {
                match graph.config.overflow {
                    OverflowPolicy::Reject => {
                        return Err(GraphError::CapacityExceeded {
                            limit: graph.config.node_capacity,
                        });
                    }
                    OverflowPolicy::Truncate => {
                        log::warn!(
                            "graph: node capacity {} reached, dropping {} and all later connections",
                            graph.config.node_capacity,
                            descriptor
                        );
                        break;
                    }
                }
            }

            let from = match from_pos {
                Some(pos) => NodeHandle(pos),
                None => graph.push_node(descriptor.from, default.clone()),
            };
            let to = match graph.position_of(descriptor.to) {
                Some(pos) => NodeHandle(pos),
                None => graph.push_node(descriptor.to, default.clone()),
            };
            graph.establish(from, Some(to));
            graph.connections.push(descriptor);
        }

        let widest = graph.compute_degrees();
        log::debug!(
            "graph: built {} nodes from {} connections (max out-degree {})",
            graph.nodes.len(),
            graph.connections.len(),
            widest
        );
        Ok(graph)
    }

    fn push_node(&mut self, id: Identity, value: V) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len());
        self.nodes.push(Node::new(id, value));
        self.identities.push(id);
        handle
    }

    /// Insert a node with no connections.
    ///
    /// Unlike literal construction, insertion past capacity is always an
    /// error, whatever the overflow policy.
    pub fn add_node(&mut self, id: Identity, value: V) -> GraphResult<NodeHandle> {
        if is_reserved(id) {
            return Err(GraphError::ReservedIdentity(id));
        }
        if self.position_of(id).is_some() {
            return Err(GraphError::DuplicateIdentity(id));
        }
        if self.nodes.len() >= self.config.node_capacity {
            return Err(GraphError::CapacityExceeded {
                limit: self.config.node_capacity,
            });
        }
        Ok(self.push_node(id, value))
    }

    /// Insert a node and connect it to each of `targets`.
    ///
    /// Unknown handles are skipped.
    pub fn add_node_with_connections<I>(
        &mut self,
        id: Identity,
        value: V,
        targets: I,
    ) -> GraphResult<NodeHandle>
    where
        I: IntoIterator<Item = NodeHandle>,
    {
        let handle = self.add_node(id, value)?;
        for target in targets {
            self.establish(handle, Some(target));
        }
        Ok(handle)
    }

    /// Storage position of `id`, by linear scan of the identity index.
    pub fn position_of(&self, id: Identity) -> Option<usize> {
        self.identities.iter().position(|&known| known == id)
    }

    /// Handle of the node named `id`.
    pub fn handle(&self, id: Identity) -> Option<NodeHandle> {
        self.position_of(id).map(NodeHandle)
    }

    /// Node behind a handle.
    pub fn node(&self, handle: NodeHandle) -> Option<&Node<V>> {
        self.nodes.get(handle.0)
    }

    /// Mutable node behind a handle. Only the payload is writable.
    pub fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node<V>> {
        self.nodes.get_mut(handle.0)
    }

    /// Node named `id`.
    pub fn node_by_id(&self, id: Identity) -> Option<&Node<V>> {
        self.handle(id).and_then(|h| self.node(h))
    }

    /// All nodes in storage order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<V>> {
        self.nodes.iter()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Active configuration.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    fn out_degree_of(&self, handle: NodeHandle) -> usize {
        self.nodes.get(handle.0).map_or(0, Node::out_degree)
    }

    /// Add the directed connection `from -> to` and its back-reference.
    ///
    /// No-op when `to` is absent, unknown, or `from` itself. Returns the
    /// out-degree of `from` (0 if `from` is unknown).
    pub fn establish(&mut self, from: NodeHandle, to: Option<NodeHandle>) -> usize {
        let Some(to) = to else {
            return self.out_degree_of(from);
        };
        if from == to || from.0 >= self.nodes.len() || to.0 >= self.nodes.len() {
            return self.out_degree_of(from);
        }
        self.nodes[from.0].outbound.push(to);
        self.nodes[to.0].inbound.push(from);
        self.nodes[from.0].out_degree()
    }

    /// Remove the first `from -> to` connection and the first matching back-reference.
    ///
    /// Each list is searched by value, so the two removals stay symmetric
    /// regardless of how establish and sever calls were interleaved.
    pub fn sever(&mut self, from: NodeHandle, to: Option<NodeHandle>) -> usize {
        let Some(to) = to else {
            return self.out_degree_of(from);
        };
        if from == to || from.0 >= self.nodes.len() || to.0 >= self.nodes.len() {
            return self.out_degree_of(from);
        }
        let outbound = &mut self.nodes[from.0].outbound;
        if let Some(pos) = outbound.iter().position(|&h| h == to) {
            outbound.remove(pos);
        }
        let inbound = &mut self.nodes[to.0].inbound;
        if let Some(pos) = inbound.iter().position(|&h| h == from) {
            inbound.remove(pos);
        }
        self.nodes[from.0].out_degree()
    }

    /// Remove the outbound connection of `from` at `position`.
    ///
    /// No-op when `position` is out of range.
    pub fn sever_at(&mut self, from: NodeHandle, position: usize) -> usize {
        let Some(to) = self.nodes.get(from.0).and_then(|n| n.neighbor_at(position)) else {
            return self.out_degree_of(from);
        };
        let inbound = &mut self.nodes[to.0].inbound;
        if let Some(pos) = inbound.iter().position(|&h| h == from) {
            inbound.remove(pos);
        }
        let outbound = &mut self.nodes[from.0].outbound;
        outbound.remove(position);
        outbound.len()
    }

    /// Recompute the cached degree list and return the largest out-degree.
    pub fn compute_degrees(&mut self) -> usize {
        self.degrees = self.nodes.iter().map(Node::out_degree).collect();
        self.degrees.iter().copied().max().unwrap_or(0)
    }

    /// Cached out-degrees, aligned with storage order.
    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    /// Cached connection list.
    pub fn connections(&self) -> &[ConnectionDescriptor] {
        &self.connections
    }

    /// Cached connection list as a JSON array.
    pub fn connections_json(&self) -> GraphResult<String> {
        Ok(serde_json::to_string(&self.connections)?)
    }

    /// Rebuild the connection list from the live adjacency, severing duplicates.
    ///
    /// Every priority is reset to 0. Returns the number of connections kept.
    pub fn optimize_connections(&mut self) -> usize {
        self.optimize_connections_with(|_, _| 0)
    }

    /// Rebuild the connection list, assigning each kept connection the
    /// priority `priority(from, to)`.
    ///
    /// For each node, a repeated target identity is severed from the node's
    /// outbound list (later occurrences go, the first stays) along with its
    /// back-reference.
    pub fn optimize_connections_with<F>(&mut self, mut priority: F) -> usize
    where
        F: FnMut(&Node<V>, &Node<V>) -> u8,
    {
        self.connections.clear();
        let mut severed = 0;

        for index in 0..self.nodes.len() {
            let node = &self.nodes[index];
            let mut accepted: Vec<Identity> = Vec::with_capacity(node.out_degree());
            let mut duplicates: Vec<usize> = Vec::new();
            let mut min_target = Identity::MAX;
            let mut max_target = Identity::MIN;

            for (position, &handle) in node.outbound.iter().enumerate() {
                let target = &self.nodes[handle.0];
                let id = target.id;
                // Outside the accepted window means never accepted.
                let fresh = if id < min_target || id > max_target {
                    min_target = min_target.min(id);
                    max_target = max_target.max(id);
                    true
                } else {
                    !accepted.contains(&id)
                };

                if fresh {
                    accepted.push(id);
                    self.connections.push(ConnectionDescriptor::with_priority(
                        node.id,
                        id,
                        priority(node, target),
                    ));
                } else {
                    duplicates.push(position);
                }
            }

            for &position in duplicates.iter().rev() {
                self.sever_at(NodeHandle(index), position);
                severed += 1;
            }
        }

        log::debug!(
            "graph: optimized to {} connections ({} duplicates severed)",
            self.connections.len(),
            severed
        );
        self.connections.len()
    }

    /// Breadth-first traversal from the node named `start_id`.
    ///
    /// Empty if `start_id` is not in the graph.
    pub fn run_breadth_first(&self, start_id: Identity) -> Vec<&Node<V>> {
        match self.handle(start_id) {
            Some(start) => traversal::breadth_first(self, start),
            None => Vec::new(),
        }
    }

    /// Filtered breadth-first traversal from the node named `start_id`.
    pub fn run_breadth_first_filtered<F>(&self, start_id: Identity, filter: F) -> Vec<&Node<V>>
    where
        F: FnMut(Option<&Node<V>>, &Node<V>) -> bool,
    {
        match self.handle(start_id) {
            Some(start) => traversal::breadth_first_filtered(self, start, filter),
            None => Vec::new(),
        }
    }

    /// Depth-first traversal from the node named `start_id`.
    pub fn run_depth_first(&self, start_id: Identity) -> Vec<&Node<V>> {
        match self.handle(start_id) {
            Some(start) => traversal::depth_first(self, start),
            None => Vec::new(),
        }
    }

    /// Filtered depth-first traversal from the node named `start_id`.
    pub fn run_depth_first_filtered<F>(&self, start_id: Identity, filter: F) -> Vec<&Node<V>>
    where
        F: FnMut(Option<&Node<V>>, &Node<V>) -> bool,
    {
        match self.handle(start_id) {
            Some(start) => traversal::depth_first_filtered(self, start, filter),
            None => Vec::new(),
        }
    }
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}
