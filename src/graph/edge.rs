//! Collaboration edges between institutions

use crate::error::{AggregationError, AggregationResult};
use serde::{Deserialize, Serialize};

/// Institution identifier as supplied by the API layer
pub type EntityId = String;

/// Undirected collaboration between two institutions on one or more projects.
/// `(a, b)` and `(b, a)` denote the same edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: EntityId,
    pub b: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Edge {
    pub fn new(a: impl Into<EntityId>, b: impl Into<EntityId>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            weight: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Reject self-loops, empty endpoints and unusable weights
    pub fn validate(&self) -> AggregationResult<()> {
        if self.a.is_empty() || self.b.is_empty() {
            return Err(AggregationError::invalid_edge(&self.a, &self.b, "empty endpoint id"));
        }
        if self.a == self.b {
            return Err(AggregationError::invalid_edge(&self.a, &self.b, "self-loop"));
        }
        if let Some(weight) = self.weight {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AggregationError::invalid_edge(
                    &self.a,
                    &self.b,
                    format!("weight {} is not a finite non-negative number", weight),
                ));
            }
        }
        Ok(())
    }

    /// Orientation-independent identity of the edge
    pub fn key(&self) -> (&str, &str) {
        if self.a <= self.b {
            (&self.a, &self.b)
        } else {
            (&self.b, &self.a)
        }
    }

    /// Weight for summation; an absent weight stands for one shared project
    pub fn effective_weight(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }

    pub fn touches(&self, id: &str) -> bool {
        self.a == id || self.b == id
    }
}
