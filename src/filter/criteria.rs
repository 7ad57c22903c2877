//! Filter options chosen in the UI

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Every recognized filter option.
///
/// An empty set, `None` range or non-positive budget means "no constraint" for
/// that dimension. Ordered sets keep the serialized form, and therefore the
/// cache fingerprint, stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub countries: BTreeSet<String>,

    /// Inclusive `(min_year, max_year)` window
    pub year_range: Option<(i32, i32)>,

    pub min_budget: f64,

    /// Minimum distinct collaborators; 0 or 1 disables the graph filter
    pub min_connections: usize,

    pub topics: BTreeSet<String>,

    pub framework_programmes: BTreeSet<String>,

    /// Ids matched by a resolved free-text search; `None` matches everything
    pub search_ids: Option<BTreeSet<String>>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_year_range(mut self, min_year: i32, max_year: i32) -> Self {
        self.year_range = Some((min_year, max_year));
        self
    }

    pub fn with_min_budget(mut self, min_budget: f64) -> Self {
        self.min_budget = min_budget;
        self
    }

    pub fn with_min_connections(mut self, min_connections: usize) -> Self {
        self.min_connections = min_connections;
        self
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_framework_programmes<I, S>(mut self, programmes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.framework_programmes = programmes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_search_ids(mut self, ids: Option<BTreeSet<String>>) -> Self {
        self.search_ids = ids;
        self
    }

    /// True when the collaboration graph filter should run
    pub fn prunes_by_degree(&self) -> bool {
        self.min_connections > 1
    }
}
