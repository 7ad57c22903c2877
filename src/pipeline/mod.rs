//! Aggregation pipeline: filter, prune, group and summarize in one pass

use crate::cache::{fingerprint, Clock, ResponseCache};
use crate::config::EngineConfig;
use crate::error::AggregationResult;
use crate::filter::{FilterCriteria, PredicateFilterSet};
use crate::geo::{metrics, GeoGroup, GeoGrouper, GroupSummary};
use crate::graph::{build_adjacency, filter_by_min_degree, merge_undirected, restrict_to_nodes, Edge};
use crate::records::{FilterableRecord, HasCost, HasGeolocation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What the rendering layer consumes for one set of criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationOutput<R> {
    pub groups: Vec<GeoGroup<R>>,
    pub filtered_edges: Vec<Edge>,
    /// Sum of surviving record costs, null counted as 0
    pub total_funding: f64,
    /// Records surviving every filter, with or without a geolocation
    pub visible_count: usize,
}

impl<R: HasCost> AggregationOutput<R> {
    pub fn group_summaries(&self) -> Vec<GroupSummary> {
        metrics::summarize_all(&self.groups)
    }
}

/// True when at least one edge endpoint names an input record
fn edges_touch_records<R: FilterableRecord>(records: &[R], edges: &[Edge]) -> bool {
    let ids: HashSet<&str> = records.iter().map(|r| r.id()).collect();
    edges
        .iter()
        .any(|edge| ids.contains(edge.a.as_str()) || ids.contains(edge.b.as_str()))
}

/// Everything that determines an output besides the rows themselves
#[derive(Serialize)]
struct RunParameters<'a> {
    criteria: &'a FilterCriteria,
    record_count: usize,
    edge_count: usize,
    precision: Option<u32>,
}

/// Runs the fixed aggregation sequence for one dataset
#[derive(Debug, Clone)]
pub struct AggregationPipeline {
    cache_key: String,
    grouper: GeoGrouper,
}

impl AggregationPipeline {
    /// Pipeline caching its results under `cache_key`
    pub fn new(cache_key: impl Into<String>) -> Self {
        Self {
            cache_key: cache_key.into(),
            grouper: GeoGrouper::exact(),
        }
    }

    pub fn from_config(cache_key: impl Into<String>, config: &EngineConfig) -> Self {
        let grouper = match config.coordinate_precision {
            Some(decimals) => GeoGrouper::with_precision(decimals),
            None => GeoGrouper::exact(),
        };
        Self::new(cache_key).with_grouper(grouper)
    }

    pub fn with_grouper(mut self, grouper: GeoGrouper) -> Self {
        self.grouper = grouper;
        self
    }

    /// Serve from `cache` when the same parameters were aggregated recently,
    /// otherwise compute and store.
    ///
    /// The fingerprint covers the criteria and the row counts, not the row
    /// contents: after reloading rows of the same size, `clear` this
    /// pipeline's key before running again.
    pub fn run<R, C>(
        &self,
        cache: &mut ResponseCache<AggregationOutput<R>, C>,
        records: &[R],
        edges: &[Edge],
        criteria: &FilterCriteria,
    ) -> AggregationResult<AggregationOutput<R>>
    where
        R: FilterableRecord + HasGeolocation + Clone,
        C: Clock,
    {
        let params = RunParameters {
            criteria,
            record_count: records.len(),
            edge_count: edges.len(),
            precision: self.grouper.precision(),
        };
        let fingerprint = match fingerprint(&params) {
            Ok(fingerprint) => fingerprint,
            Err(e) => {
                log::warn!("Could not fingerprint criteria, bypassing cache: {}", e);
                return self.compute(records, edges, criteria);
            }
        };

        if let Some(cached) = cache.get(&self.cache_key, &fingerprint) {
            return Ok(cached.clone());
        }

        let output = self.compute(records, edges, criteria)?;
        cache.set(&self.cache_key, output.clone(), &fingerprint);
        Ok(output)
    }

    /// Aggregate without touching any cache
    pub fn compute<R>(
        &self,
        records: &[R],
        edges: &[Edge],
        criteria: &FilterCriteria,
    ) -> AggregationResult<AggregationOutput<R>>
    where
        R: FilterableRecord + HasGeolocation + Clone,
    {
        for edge in edges {
            edge.validate()?;
        }

        // 1. predicates, cheapest dimensions first
        let filter_set = PredicateFilterSet::from_criteria(criteria);
        let mut visible = filter_set.apply(records);
        log::info!(
            "Filters {:?} kept {} of {} records",
            filter_set.dimensions(),
            visible.len(),
            records.len()
        );

        // 2. adjacency over edges between surviving records
        let surviving: HashSet<&str> = visible.iter().map(|r| r.id()).collect();
        let edges_in_view = restrict_to_nodes(edges, &surviving);
        if edges_in_view.is_empty() && !edges.is_empty() && !edges_touch_records(records, edges) {
            log::warn!(
                "None of the {} edges touch an input record; are they keyed by another entity kind?",
                edges.len()
            );
        }
        let adjacency = build_adjacency(&edges_in_view)?;

        // 3. single-pass degree pruning
        let kept_edges = if criteria.prunes_by_degree() {
            let min_degree = criteria.min_connections;
            visible.retain(|r| adjacency.degree(r.id()) >= min_degree);
            filter_by_min_degree(&edges_in_view, &adjacency, min_degree)
        } else {
            edges_in_view
        };
        let filtered_edges = merge_undirected(&kept_edges);

        // 4. grouping
        let groups = self.grouper.group(&visible)?;

        // 5. summary scalars
        let total_funding: f64 = visible
            .iter()
            .filter_map(|r| r.total_cost())
            .filter(|cost| cost.is_finite())
            .sum();

        log::info!(
            "Aggregated {} records into {} locations with {} collaborations",
            visible.len(),
            groups.len(),
            filtered_edges.len()
        );

        Ok(AggregationOutput {
            groups,
            filtered_edges,
            total_funding,
            visible_count: visible.len(),
        })
    }
}
