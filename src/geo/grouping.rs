//! Grouping of point records by coordinate

use crate::error::{AggregationError, AggregationResult};
use crate::geo::GeoGroup;
use crate::records::HasGeolocation;
use std::collections::HashMap;

/// Finest rounding an f64 coordinate can represent meaningfully
pub const MAX_COORDINATE_PRECISION: u32 = 15;

/// Groups records into `GeoGroup`s keyed by their serialized coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeoGrouper {
    /// Decimal places to round to before keying; `None` keys on exact values
    precision: Option<u32>,
}

impl GeoGrouper {
    /// Grouper keying on exact coordinate values
    pub fn exact() -> Self {
        Self { precision: None }
    }

    /// Grouper that rounds both components to `decimals` places first.
    /// Precision is capped at [`MAX_COORDINATE_PRECISION`].
    pub fn with_precision(decimals: u32) -> Self {
        if decimals > MAX_COORDINATE_PRECISION {
            log::warn!(
                "Coordinate precision {} capped at {}",
                decimals,
                MAX_COORDINATE_PRECISION
            );
        }
        Self {
            precision: Some(decimals.min(MAX_COORDINATE_PRECISION)),
        }
    }

    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    /// Group records by geolocation.
    ///
    /// Records without a geolocation are skipped. Groups come out in order of
    /// first-seen coordinate and members keep their input order.
    pub fn group<R>(&self, records: &[R]) -> AggregationResult<Vec<GeoGroup<R>>>
    where
        R: HasGeolocation + Clone,
    {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());
        let mut groups: Vec<GeoGroup<R>> = Vec::new();
        let mut skipped = 0usize;

        for record in records {
            let Some([lat, lon]) = record.geolocation() else {
                skipped += 1;
                continue;
            };

            if !lat.is_finite() || !lon.is_finite() {
                return Err(AggregationError::InvalidCoordinate {
                    id: record.id().to_string(),
                    lat,
                    lon,
                });
            }

            let coordinate = self.canonicalize([lat, lon]);
            let key = coordinate_key(coordinate);

            let slot = *index.entry(key).or_insert_with(|| {
                groups.push(GeoGroup::new(coordinate));
                groups.len() - 1
            });
            groups[slot].push(record.clone());
        }

        if skipped > 0 {
            log::debug!("Skipped {} records without geolocation", skipped);
        }
        log::debug!("Grouped {} records into {} locations", records.len() - skipped, groups.len());

        Ok(groups)
    }

    fn canonicalize(&self, [lat, lon]: [f64; 2]) -> [f64; 2] {
        match self.precision {
            Some(decimals) => [round_to(lat, decimals), round_to(lon, decimals)],
            None => [normalize_zero(lat), normalize_zero(lon)],
        }
    }
}

/// `"lat,lon"` using the shortest round-trip representation of each component
fn coordinate_key([lat, lon]: [f64; 2]) -> String {
    format!("{},{}", lat, lon)
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    normalize_zero((value * factor).round() / factor)
}

// -0.0 == 0.0 but formats differently
fn normalize_zero(value: f64) -> f64 {
    value + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_uses_literal_values() {
        assert_eq!(coordinate_key([50.0, 10.25]), "50,10.25");
        assert_ne!(coordinate_key([50.1, 10.0]), coordinate_key([50.10000001, 10.0]));
    }

    #[test]
    fn negative_zero_shares_key_with_zero() {
        let grouper = GeoGrouper::exact();
        assert_eq!(
            coordinate_key(grouper.canonicalize([-0.0, 5.0])),
            coordinate_key(grouper.canonicalize([0.0, 5.0]))
        );
    }

    #[test]
    fn rounding_collapses_nearby_points() {
        let grouper = GeoGrouper::with_precision(4);
        assert_eq!(
            grouper.canonicalize([48.856613, 2.352222]),
            grouper.canonicalize([48.856601, 2.352249])
        );
    }
}
