//! Configuration management for the aggregation engine

use crate::geo::grouping::MAX_COORDINATE_PRECISION;
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TTL for responses derived from live API data (12 hours)
pub const API_RESPONSE_TTL_MS: u64 = 12 * 60 * 60 * 1000;

/// TTL for slow-moving reference data such as topic lists (7 days)
pub const REFERENCE_DATA_TTL_MS: u64 = 7 * 24 * 60 * 60 * 1000;

/// Default configuration for the aggregation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Time-to-live of cached aggregation results in milliseconds
    pub cache_ttl_ms: u64,

    /// Maximum number of cached entries (0 = unbounded)
    pub cache_capacity: usize,

    /// Decimal places coordinates are rounded to before grouping.
    /// `None` groups on exact coordinate values.
    pub coordinate_precision: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_ttl_ms: API_RESPONSE_TTL_MS,
            cache_capacity: 256,
            coordinate_precision: None,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with custom values
    pub fn new(cache_ttl_ms: u64, cache_capacity: usize, coordinate_precision: Option<u32>) -> Self {
        Self {
            cache_ttl_ms,
            cache_capacity,
            coordinate_precision,
        }
    }

    /// Load a configuration from a JSON file; absent fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("invalid config file {}", path.display()))?;

        log::debug!("Loaded engine config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Reject values the engine cannot honour
    pub fn validate(&self) -> Result<()> {
        if let Some(decimals) = self.coordinate_precision {
            if decimals > MAX_COORDINATE_PRECISION {
                bail!(
                    "coordinate precision {} exceeds the maximum of {} decimals",
                    decimals,
                    MAX_COORDINATE_PRECISION
                );
            }
        }
        Ok(())
    }
}

/// Kind of rows fed to the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    Institutions,
    Projects,
}

impl RecordKind {
    /// Cache key the pipeline stores this kind's results under
    pub fn cache_key(self) -> &'static str {
        match self {
            RecordKind::Institutions => "institutions",
            RecordKind::Projects => "projects",
        }
    }

    /// Collaboration edges connect institutions, so only institution rows
    /// can be restricted or pruned by them.
    pub fn check_graph_options(self, has_edges: bool, min_connections: usize) -> Result<()> {
        if self == RecordKind::Institutions {
            return Ok(());
        }
        if has_edges {
            bail!("collaboration edges only apply to institution records");
        }
        if min_connections > 1 {
            bail!("a minimum connection count only applies to institution records");
        }
        Ok(())
    }
}
