//! Fluent API for building Graph instances.

use crate::config::GraphConfig;
use crate::types::{ConnectionDescriptor, GraphResult, Identity};

use super::Graph;

/// Fluent builder collecting connections before constructing a [`Graph`].
pub struct GraphBuilder<V> {
    default: V,
    config: GraphConfig,
    connections: Vec<ConnectionDescriptor>,
}

impl<V: Clone> GraphBuilder<V> {
    /// Create a builder whose nodes all start with `default`.
    pub fn new(default: V) -> Self {
        Self {
            default,
            config: GraphConfig::default(),
            connections: Vec::new(),
        }
    }

    /// Use a specific configuration.
    pub fn config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a connection with priority 0.
    pub fn connect(mut self, from: Identity, to: Identity) -> Self {
        self.connections.push(ConnectionDescriptor::new(from, to));
        self
    }

    /// Add a prioritized connection.
    pub fn connect_with_priority(mut self, from: Identity, to: Identity, priority: u8) -> Self {
        self.connections
            .push(ConnectionDescriptor::with_priority(from, to, priority));
        self
    }

    /// Add many connections at once.
    pub fn connections<I, C>(mut self, descriptors: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ConnectionDescriptor>,
    {
        self.connections
            .extend(descriptors.into_iter().map(Into::into));
        self
    }

    /// Build the final Graph.
    pub fn build(self) -> GraphResult<Graph<V>> {
        Graph::from_connections_with_config(self.default, self.connections, self.config)
    }
}

impl<V: Clone + Default> Default for GraphBuilder<V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}
