use research_map_engine::cache::{ManualClock, ResponseCache};
use research_map_engine::config::EngineConfig;
use research_map_engine::filter::FilterCriteria;
use research_map_engine::graph::Edge;
use research_map_engine::pipeline::{AggregationOutput, AggregationPipeline};
use research_map_engine::records::Institution;
use research_map_engine::AggregationError;

fn institution(id: &str, country: &str, geolocation: Option<[f64; 2]>, cost: Option<f64>) -> Institution {
    Institution {
        id: id.to_string(),
        name: format!("Institution {}", id),
        short_name: None,
        country_code: Some(country.to_string()),
        geolocation,
        total_cost: cost,
        start_date: Some("2015-01-01".to_string()),
        end_date: Some("2020-12-31".to_string()),
        topics: Vec::new(),
        framework_programmes: vec!["H2020".to_string()],
    }
}

fn dataset() -> (Vec<Institution>, Vec<Edge>) {
    let records = vec![
        institution("A", "DE", Some([52.52, 13.40]), Some(100.0)),
        institution("B", "DE", Some([52.52, 13.40]), Some(200.0)),
        institution("C", "FR", Some([48.85, 2.35]), Some(50.0)),
        institution("D", "FR", Some([45.76, 4.83]), None),
        institution("E", "IT", None, Some(25.0)),
    ];
    let edges = vec![
        Edge::new("A", "B"),
        Edge::new("A", "C"),
        Edge::new("B", "C"),
        Edge::new("D", "A"),
        Edge::new("C", "A").with_weight(2.0),
    ];
    (records, edges)
}

fn cache(clock: &ManualClock) -> ResponseCache<AggregationOutput<Institution>, ManualClock> {
    ResponseCache::with_clock(60_000, clock.clone())
}

#[test]
fn unfiltered_run_groups_everything() {
    let (records, edges) = dataset();

    let output = AggregationPipeline::new("institutions")
        .compute(&records, &edges, &FilterCriteria::default())
        .unwrap();

    assert_eq!(output.visible_count, 5);
    assert_eq!(output.total_funding, 375.0);
    assert_eq!(output.groups.len(), 3);
    assert_eq!(output.groups[0].count, 2);
    // A-C and C-A collapse into one weighted edge
    assert_eq!(output.filtered_edges.len(), 4);
    assert_eq!(output.filtered_edges[1], Edge::new("A", "C").with_weight(3.0));
}

#[test]
fn country_filter_restricts_records_and_edges() {
    let (records, edges) = dataset();
    let criteria = FilterCriteria::new().with_countries(["DE"]);

    let output = AggregationPipeline::new("institutions")
        .compute(&records, &edges, &criteria)
        .unwrap();

    assert_eq!(output.visible_count, 2);
    assert_eq!(output.total_funding, 300.0);
    assert_eq!(output.groups.len(), 1);
    assert_eq!(output.filtered_edges, vec![Edge::new("A", "B")]);
}

#[test]
fn min_connections_prunes_weakly_connected_institutions() {
    let (records, edges) = dataset();
    let criteria = FilterCriteria::new().with_min_connections(2);

    let output = AggregationPipeline::new("institutions")
        .compute(&records, &edges, &criteria)
        .unwrap();

    // D has one partner, E none
    assert_eq!(output.visible_count, 3);
    assert_eq!(output.total_funding, 350.0);
    assert!(output.filtered_edges.iter().all(|e| !e.touches("D")));
    assert_eq!(output.filtered_edges.len(), 3);
    let ids: Vec<&str> = output
        .groups
        .iter()
        .flat_map(|g| g.members.iter().map(|m| m.id.as_str()))
        .collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
}

#[test]
fn min_connections_of_one_keeps_isolated_records() {
    let (records, edges) = dataset();
    let criteria = FilterCriteria::new().with_min_connections(1);

    let output = AggregationPipeline::new("institutions")
        .compute(&records, &edges, &criteria)
        .unwrap();

    assert_eq!(output.visible_count, 5);
}

#[test]
fn self_loop_in_input_is_an_error() {
    let (records, mut edges) = dataset();
    edges.push(Edge::new("E", "E"));

    let err = AggregationPipeline::new("institutions")
        .compute(&records, &edges, &FilterCriteria::default())
        .unwrap_err();

    assert!(matches!(err, AggregationError::InvalidEdge { .. }));
}

#[test]
fn repeated_runs_are_identical() {
    let (records, edges) = dataset();
    let criteria = FilterCriteria::new().with_year_range(2018, 2019).with_min_connections(2);
    let pipeline = AggregationPipeline::new("institutions");

    let first = pipeline.compute(&records, &edges, &criteria).unwrap();
    let second = pipeline.compute(&records, &edges, &criteria).unwrap();

    assert_eq!(first, second);
}

#[test]
fn cached_run_matches_fresh_run() {
    let (records, edges) = dataset();
    let clock = ManualClock::starting_at(0);
    let mut cache = cache(&clock);
    let pipeline = AggregationPipeline::new("institutions");
    let criteria = FilterCriteria::new().with_countries(["FR"]);

    let fresh = pipeline.run(&mut cache, &records, &edges, &criteria).unwrap();
    assert_eq!(cache.stats().keys, vec!["institutions".to_string()]);

    let cached = pipeline.run(&mut cache, &records, &edges, &criteria).unwrap();
    assert_eq!(fresh, cached);
}

#[test]
fn cache_is_bypassed_when_criteria_change() {
    let (records, edges) = dataset();
    let clock = ManualClock::starting_at(0);
    let mut cache = cache(&clock);
    let pipeline = AggregationPipeline::new("institutions");

    let german = pipeline
        .run(&mut cache, &records, &edges, &FilterCriteria::new().with_countries(["DE"]))
        .unwrap();
    let french = pipeline
        .run(&mut cache, &records, &edges, &FilterCriteria::new().with_countries(["FR"]))
        .unwrap();

    assert_eq!(german.visible_count, 2);
    assert_eq!(french.visible_count, 2);
    assert_ne!(german, french);
}

#[test]
fn cache_hit_serves_stored_output() {
    let (records, edges) = dataset();
    let clock = ManualClock::starting_at(0);
    let mut cache = cache(&clock);
    let pipeline = AggregationPipeline::new("institutions");
    let criteria = FilterCriteria::default();

    pipeline.run(&mut cache, &records, &edges, &criteria).unwrap();

    // Same parameters with different row contents: the stored result wins
    let mut changed = records.clone();
    changed[0].total_cost = Some(1_000.0);
    let served = pipeline.run(&mut cache, &changed, &edges, &criteria).unwrap();
    assert_eq!(served.total_funding, 375.0);

    clock.advance(60_001);
    let recomputed = pipeline.run(&mut cache, &changed, &edges, &criteria).unwrap();
    assert_eq!(recomputed.total_funding, 1_275.0);
}

#[test]
fn configured_precision_merges_nearby_locations() {
    let records = vec![
        institution("A", "DE", Some([52.520001, 13.4]), None),
        institution("B", "DE", Some([52.520004, 13.4]), None),
    ];
    let config = EngineConfig::new(1_000, 0, Some(4));

    let output = AggregationPipeline::from_config("institutions", &config)
        .compute(&records, &[], &FilterCriteria::default())
        .unwrap();

    assert_eq!(output.groups.len(), 1);
    assert_eq!(output.groups[0].count, 2);
}

#[test]
fn group_summaries_are_ordered_by_size() {
    let (records, edges) = dataset();

    let output = AggregationPipeline::new("institutions")
        .compute(&records, &edges, &FilterCriteria::default())
        .unwrap();
    let summaries = output.group_summaries();

    assert_eq!(summaries[0].count, 2);
    assert_eq!(summaries[0].total_cost, 300.0);
    assert_eq!(summaries.iter().map(|s| s.count).sum::<usize>(), 4);
}
