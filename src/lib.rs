//! Digraph toolkit — an in-memory directed graph with adjacency bookkeeping.
//!
//! Nodes live in an arena addressed by [`NodeHandle`]s and carry a payload,
//! an outbound list and an inbound list kept symmetric by every edge
//! operation. The graph reports its edges as [`ConnectionDescriptor`]s,
//! deduplicates parallel edges on request, and walks the adjacency with
//! breadth-first and depth-first traversals, optionally filtered.
//!
//! The graph has no internal synchronization: mutate and traverse from one
//! thread at a time.

pub mod config;
pub mod graph;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::{GraphConfig, OverflowPolicy};
pub use graph::{Graph, GraphBuilder, SearchState};
pub use types::{
    is_reserved, ConnectionDescriptor, GraphError, GraphResult, Identity, Node, NodeHandle,
    MAX_IDENTITY, NODE_CEILING, NOT_FOUND, UNINITIALIZED,
};
