//! Adjacency construction

use crate::error::AggregationResult;
use crate::graph::{Edge, EntityId};
use std::collections::{HashMap, HashSet};

/// Distinct collaborators per institution.
///
/// Degree is the size of a node's set, so five shared projects with the same
/// partner still count once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyIndex {
    neighbors: HashMap<EntityId, HashSet<EntityId>>,
}

impl AdjacencyIndex {
    /// Number of distinct partners; unknown ids have degree 0
    pub fn degree(&self, id: &str) -> usize {
        self.neighbors.get(id).map_or(0, HashSet::len)
    }

    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of distinct undirected pairs
    pub fn pair_count(&self) -> usize {
        self.neighbors.values().map(HashSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Iterate `(id, degree)` in arbitrary order
    pub fn degrees(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.neighbors.iter().map(|(id, set)| (id.as_str(), set.len()))
    }
}

/// Builder for incrementally constructing an `AdjacencyIndex`
#[derive(Debug, Default)]
pub struct AdjacencyBuilder {
    neighbors: HashMap<EntityId, HashSet<EntityId>>,
    edges_seen: usize,
}

impl AdjacencyBuilder {
    /// Create a new builder with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            neighbors: HashMap::with_capacity(capacity),
            edges_seen: 0,
        }
    }

    /// Insert both directions of an edge; rejects malformed edges
    pub fn add_edge(&mut self, edge: &Edge) -> AggregationResult<()> {
        edge.validate()?;

        self.neighbors
            .entry(edge.a.clone())
            .or_default()
            .insert(edge.b.clone());
        self.neighbors
            .entry(edge.b.clone())
            .or_default()
            .insert(edge.a.clone());
        self.edges_seen += 1;

        Ok(())
    }

    /// Build the adjacency index
    pub fn build(self) -> AdjacencyIndex {
        log::debug!(
            "Built adjacency over {} edges: {} institutions",
            self.edges_seen,
            self.neighbors.len()
        );
        AdjacencyIndex {
            neighbors: self.neighbors,
        }
    }
}

/// Build the adjacency index of an edge list in one pass
pub fn build_adjacency(edges: &[Edge]) -> AggregationResult<AdjacencyIndex> {
    let mut builder = AdjacencyBuilder::with_capacity(edges.len());
    for edge in edges {
        builder.add_edge(edge)?;
    }
    Ok(builder.build())
}
