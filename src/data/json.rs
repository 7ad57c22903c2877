//! JSON row loading

use crate::graph::Edge;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load an array of records
pub fn load_records<R: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<R>> {
    let path = path.as_ref();
    log::info!("Reading records from {}", path.display());

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let records: Vec<R> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing records in {}", path.display()))?;

    log::info!("Loaded {} records", records.len());
    Ok(records)
}

/// Load an array of `{a, b, weight?}` edges, rejecting malformed ones
pub fn load_edges(path: impl AsRef<Path>) -> Result<Vec<Edge>> {
    let path = path.as_ref();
    log::info!("Reading collaboration edges from {}", path.display());

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let edges: Vec<Edge> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing edges in {}", path.display()))?;

    for edge in &edges {
        edge.validate()?;
    }

    log::info!("Loaded {} collaboration edges", edges.len());
    Ok(edges)
}
