//! Error types for the digraph toolkit.

use thiserror::Error;

/// All errors that can occur while building or exporting a graph.
///
/// Lookups, self-loops, absent neighbors and out-of-range positions are not
/// errors: those report `None` or an unchanged degree instead.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Adding another node would exceed the configured node capacity.
    #[error("Node capacity exceeded: graph holds at most {limit} nodes")]
    CapacityExceeded { limit: usize },

    /// Identity falls in the reserved sentinel range.
    #[error("Identity {0} is reserved and cannot name a node")]
    ReservedIdentity(u32),

    /// Explicit insertion of an identity that is already present.
    #[error("Node identity {0} already exists")]
    DuplicateIdentity(u32),

    /// JSON export failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
