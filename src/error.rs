//! Typed errors for the aggregation core.

use thiserror::Error;

/// Errors raised by grouping, graph construction and the pipeline.
///
/// Data-quality problems (missing geolocation, missing dates, null costs)
/// are never errors; they only exclude the record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    /// Self-loop, empty endpoint or unusable weight
    #[error("invalid edge ({a}, {b}): {reason}")]
    InvalidEdge {
        a: String,
        b: String,
        reason: String,
    },

    /// Non-finite geolocation component reaching the grouper
    #[error("invalid coordinate [{lat}, {lon}] on record {id}")]
    InvalidCoordinate { id: String, lat: f64, lon: f64 },
}

impl AggregationError {
    pub(crate) fn invalid_edge(a: &str, b: &str, reason: impl Into<String>) -> Self {
        Self::InvalidEdge {
            a: a.to_string(),
            b: b.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for core operations.
pub type AggregationResult<T> = std::result::Result<T, AggregationError>;
