//! Collaboration graph representation and algorithms module

pub mod edge;
pub mod builder;
pub mod algorithms;

pub use algorithms::{filter_by_min_degree, merge_undirected, most_connected, restrict_to_nodes};
pub use builder::{build_adjacency, AdjacencyBuilder, AdjacencyIndex};
pub use edge::{Edge, EntityId};
