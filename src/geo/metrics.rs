//! Per-group statistics for stat displays

use crate::geo::GeoGroup;
use crate::records::HasCost;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Derived figures for one `GeoGroup`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub geolocation: [f64; 2],
    pub count: usize,

    /// Sum of member costs, null and non-finite costs counted as 0
    pub total_cost: f64,

    /// Mean over members with a known cost, if any
    pub mean_cost: Option<f64>,

    /// Largest known member cost, if any
    pub max_cost: Option<f64>,
}

/// Calculate cost statistics for a group
pub fn summarize<R: HasCost>(group: &GeoGroup<R>) -> GroupSummary {
    let known: Vec<f64> = group
        .members
        .iter()
        .filter_map(|m| m.total_cost())
        .filter(|cost| cost.is_finite())
        .collect();

    let (mean_cost, max_cost) = if known.is_empty() {
        (None, None)
    } else {
        (
            Some(Statistics::mean(known.iter())),
            Some(Statistics::max(known.iter())),
        )
    };

    GroupSummary {
        geolocation: group.geolocation,
        count: group.count,
        total_cost: known.iter().sum(),
        mean_cost,
        max_cost,
    }
}

/// Summaries for every group, largest first (ties keep group order)
pub fn summarize_all<R: HasCost>(groups: &[GeoGroup<R>]) -> Vec<GroupSummary> {
    let mut summaries: Vec<GroupSummary> = groups.iter().map(summarize).collect();
    summaries.sort_by(|a, b| b.count.cmp(&a.count));
    summaries
}
