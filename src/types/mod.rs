//! All data types for the digraph toolkit.

pub mod connection;
pub mod error;
pub mod node;

pub use connection::ConnectionDescriptor;
pub use error::{GraphError, GraphResult};
pub use node::{Node, NodeHandle};

/// External node identity.
pub type Identity = u32;

/// Largest identity that may name a real node.
pub const MAX_IDENTITY: Identity = u32::MAX - 2;

/// Sentinel for "no identity observed yet".
pub const UNINITIALIZED: Identity = u32::MAX - 1;

/// Sentinel for "identity not present".
pub const NOT_FOUND: Identity = u32::MAX;

/// Default maximum number of nodes a graph accepts.
pub const NODE_CEILING: usize = 4_294_967_290;

/// Whether an identity is one of the reserved sentinels.
pub fn is_reserved(id: Identity) -> bool {
    id > MAX_IDENTITY
}
