//! Geolocation grouping module

pub mod grouping;
pub mod metrics;

use serde::{Deserialize, Serialize};

pub use grouping::GeoGrouper;
pub use metrics::GroupSummary;

/// Records sharing one exact geolocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoGroup<R> {
    /// Shared `[lat, lon]` of every member
    pub geolocation: [f64; 2],

    /// Members in input order
    pub members: Vec<R>,

    /// Always equal to `members.len()`
    pub count: usize,
}

impl<R> GeoGroup<R> {
    fn new(geolocation: [f64; 2]) -> Self {
        Self {
            geolocation,
            members: Vec::new(),
            count: 0,
        }
    }

    fn push(&mut self, record: R) {
        self.members.push(record);
        self.count = self.members.len();
    }
}
