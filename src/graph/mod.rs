//! In-memory directed graph: container, construction, and traversal.

pub mod builder;
pub mod digraph;
pub mod search;
pub mod traversal;

pub use builder::GraphBuilder;
pub use digraph::Graph;
pub use search::SearchState;
pub use traversal::{breadth_first, breadth_first_filtered, depth_first, depth_first_filtered};
