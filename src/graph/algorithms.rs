//! Graph algorithms over collaboration edges

use crate::graph::{AdjacencyIndex, Edge, EntityId};
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

/// Keep edges whose endpoints both reach `min_degree` in `adjacency`.
///
/// Degrees come from the index as given and are not recomputed after
/// removals, so the surviving graph may contain nodes whose remaining degree
/// is below the threshold. A threshold of 0 or 1 returns the input unchanged.
pub fn filter_by_min_degree(edges: &[Edge], adjacency: &AdjacencyIndex, min_degree: usize) -> Vec<Edge> {
    if min_degree <= 1 {
        return edges.to_vec();
    }

    let kept: Vec<Edge> = edges
        .iter()
        .filter(|edge| {
            adjacency.degree(&edge.a) >= min_degree && adjacency.degree(&edge.b) >= min_degree
        })
        .cloned()
        .collect();

    log::debug!(
        "Degree filter (min {}) kept {} of {} edges",
        min_degree,
        kept.len(),
        edges.len()
    );
    kept
}

/// Keep edges whose endpoints are both in `ids`
pub fn restrict_to_nodes(edges: &[Edge], ids: &HashSet<&str>) -> Vec<Edge> {
    edges
        .iter()
        .filter(|edge| ids.contains(edge.a.as_str()) && ids.contains(edge.b.as_str()))
        .cloned()
        .collect()
}

/// Collapse `(a, b)` / `(b, a)` duplicates into one edge per pair.
///
/// The first-seen orientation wins and weights are summed, absent weights
/// counting as 1. A pair seen once is passed through untouched.
pub fn merge_undirected(edges: &[Edge]) -> Vec<Edge> {
    let mut slots: HashMap<(&str, &str), usize> = HashMap::with_capacity(edges.len());
    let mut merged: Vec<Edge> = Vec::new();
    let mut totals: Vec<(f64, usize)> = Vec::new();

    for edge in edges {
        match slots.get(&edge.key()) {
            Some(&slot) => {
                totals[slot].0 += edge.effective_weight();
                totals[slot].1 += 1;
            }
            None => {
                slots.insert(edge.key(), merged.len());
                merged.push(edge.clone());
                totals.push((edge.effective_weight(), 1));
            }
        }
    }

    for (edge, (weight, occurrences)) in merged.iter_mut().zip(totals) {
        if occurrences > 1 {
            edge.weight = Some(weight);
        }
    }

    merged
}

/// Top `n` institutions by degree, ties broken by id
pub fn most_connected(adjacency: &AdjacencyIndex, n: usize) -> Vec<(EntityId, usize)> {
    adjacency
        .degrees()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .take(n)
        .map(|(id, degree)| (id.to_string(), degree))
        .collect()
}
