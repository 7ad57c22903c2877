//! Option domains offered by the filter controls

use crate::filter::predicates::parse_year;
use crate::records::FilterableRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Distinct values and bounds present in a dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facets {
    pub countries: BTreeSet<String>,
    pub topics: BTreeSet<String>,
    pub framework_programmes: BTreeSet<String>,

    /// Earliest and latest year of any record date
    pub year_bounds: Option<(i32, i32)>,

    pub max_cost: Option<f64>,
}

impl Facets {
    /// Scan records once and gather every facet
    pub fn collect<R: FilterableRecord>(records: &[R]) -> Self {
        let mut facets = Self::default();
        let mut unparseable = 0usize;

        for record in records {
            if let Some(country) = record.country() {
                facets.countries.insert(country.to_string());
            }
            facets.topics.extend(record.topic_ids().iter().cloned());
            facets
                .framework_programmes
                .extend(record.framework_programmes().iter().cloned());

            for raw in [record.start_date(), record.end_date()].into_iter().flatten() {
                match parse_year(raw) {
                    Some(year) => facets.widen_years(year),
                    None => unparseable += 1,
                }
            }

            if let Some(cost) = record.total_cost().filter(|c| c.is_finite()) {
                facets.max_cost = Some(facets.max_cost.map_or(cost, |max| max.max(cost)));
            }
        }

        if unparseable > 0 {
            log::warn!("{} dates could not be parsed while collecting facets", unparseable);
        }

        facets
    }

    fn widen_years(&mut self, year: i32) {
        let (min, max) = self.year_bounds.unwrap_or((year, year));
        self.year_bounds = Some((min.min(year), max.max(year)));
    }
}
