use research_map_engine::geo::grouping::MAX_COORDINATE_PRECISION;
use research_map_engine::geo::{metrics, GeoGrouper};
use research_map_engine::records::Institution;
use research_map_engine::AggregationError;

fn institution(id: &str, geolocation: Option<[f64; 2]>, cost: Option<f64>) -> Institution {
    Institution {
        id: id.to_string(),
        name: format!("Institution {}", id),
        short_name: None,
        country_code: Some("DE".to_string()),
        geolocation,
        total_cost: cost,
        start_date: None,
        end_date: None,
        topics: Vec::new(),
        framework_programmes: Vec::new(),
    }
}

#[test]
fn records_sharing_a_coordinate_form_one_group() {
    let records = vec![
        institution("1", Some([50.0, 10.0]), Some(100.0)),
        institution("2", Some([50.0, 10.0]), Some(200.0)),
        institution("3", Some([51.0, 11.0]), Some(50.0)),
    ];

    let groups = GeoGrouper::exact().group(&records).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].geolocation, [50.0, 10.0]);
    assert_eq!(groups[0].count, 2);
    let cost: f64 = groups[0].members.iter().filter_map(|m| m.total_cost).sum();
    assert_eq!(cost, 300.0);
    assert_eq!(groups[1].count, 1);
}

#[test]
fn groups_follow_first_seen_order_and_members_keep_input_order() {
    let records = vec![
        institution("a", Some([1.0, 1.0]), None),
        institution("b", Some([2.0, 2.0]), None),
        institution("c", Some([1.0, 1.0]), None),
        institution("d", Some([3.0, 3.0]), None),
        institution("e", Some([2.0, 2.0]), None),
    ];

    let groups = GeoGrouper::exact().group(&records).unwrap();

    let locations: Vec<[f64; 2]> = groups.iter().map(|g| g.geolocation).collect();
    assert_eq!(locations, vec![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]);
    let first: Vec<&str> = groups[0].members.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(first, vec!["a", "c"]);
    let second: Vec<&str> = groups[1].members.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(second, vec!["b", "e"]);
}

#[test]
fn group_counts_cover_every_located_record_exactly_once() {
    let records = vec![
        institution("1", Some([48.1, 11.5]), None),
        institution("2", None, None),
        institution("3", Some([48.1, 11.5]), None),
        institution("4", Some([48.10001, 11.5]), None),
        institution("5", None, None),
    ];

    let groups = GeoGrouper::exact().group(&records).unwrap();

    let total: usize = groups.iter().map(|g| g.count).sum();
    assert_eq!(total, 3);
    for group in &groups {
        assert_eq!(group.count, group.members.len());
        assert!(group.members.iter().all(|m| m.geolocation == Some(group.geolocation)));
    }
    // near-identical coordinates stay apart without rounding
    assert_eq!(groups.len(), 2);
}

#[test]
fn precision_merges_coordinates_that_differ_below_it() {
    let records = vec![
        institution("1", Some([48.100001, 11.5]), None),
        institution("2", Some([48.100004, 11.5]), None),
    ];

    let groups = GeoGrouper::with_precision(4).group(&records).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].geolocation, [48.1, 11.5]);
    assert_eq!(groups[0].count, 2);
}

#[test]
fn empty_input_yields_no_groups() {
    let groups = GeoGrouper::exact().group::<Institution>(&[]).unwrap();
    assert!(groups.is_empty());
}

#[test]
fn non_finite_coordinate_is_rejected() {
    let records = vec![
        institution("ok", Some([1.0, 2.0]), None),
        institution("bad", Some([f64::NAN, 2.0]), None),
    ];

    let err = GeoGrouper::exact().group(&records).unwrap_err();

    assert!(matches!(err, AggregationError::InvalidCoordinate { ref id, .. } if id == "bad"));
}

#[test]
fn summary_reports_costs_of_a_group() {
    let records = vec![
        institution("1", Some([50.0, 10.0]), Some(100.0)),
        institution("2", Some([50.0, 10.0]), None),
        institution("3", Some([50.0, 10.0]), Some(300.0)),
    ];
    let groups = GeoGrouper::exact().group(&records).unwrap();

    let summary = metrics::summarize(&groups[0]);

    assert_eq!(summary.count, 3);
    assert_eq!(summary.total_cost, 400.0);
    assert_eq!(summary.mean_cost, Some(200.0));
    assert_eq!(summary.max_cost, Some(300.0));
}

#[test]
fn summary_of_costless_group_has_no_mean() {
    let records = vec![institution("1", Some([0.0, 0.0]), None)];
    let groups = GeoGrouper::exact().group(&records).unwrap();

    let summary = metrics::summarize(&groups[0]);

    assert_eq!(summary.total_cost, 0.0);
    assert_eq!(summary.mean_cost, None);
    assert_eq!(summary.max_cost, None);
}

#[test]
fn oversized_precision_is_capped_and_keeps_locations_apart() {
    let grouper = GeoGrouper::with_precision(400);
    let records = vec![
        institution("a", Some([50.0, 10.0]), None),
        institution("b", Some([-33.0, 151.0]), None),
    ];

    let groups = grouper.group(&records).unwrap();

    assert_eq!(grouper.precision(), Some(MAX_COORDINATE_PRECISION));
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].geolocation, [50.0, 10.0]);
    assert_eq!(groups[1].geolocation, [-33.0, 151.0]);
}

#[test]
fn summary_ignores_non_finite_costs() {
    let records = vec![
        institution("1", Some([50.0, 10.0]), Some(100.0)),
        institution("2", Some([50.0, 10.0]), Some(f64::INFINITY)),
        institution("3", Some([50.0, 10.0]), Some(f64::NAN)),
    ];
    let groups = GeoGrouper::exact().group(&records).unwrap();

    let summary = metrics::summarize(&groups[0]);

    assert_eq!(summary.count, 3);
    assert_eq!(summary.total_cost, 100.0);
    assert_eq!(summary.mean_cost, Some(100.0));
    assert_eq!(summary.max_cost, Some(100.0));
}
