//! Loading of externally produced rows

pub mod json;
pub mod parquet;

use crate::graph::Edge;
use anyhow::Result;
use std::path::Path;

/// Load collaboration edges from a `.parquet` or JSON file
pub fn load_edges(path: impl AsRef<Path>) -> Result<Vec<Edge>> {
    let path = path.as_ref();
    let is_parquet = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));

    if is_parquet {
        parquet::load_edges(path)
    } else {
        json::load_edges(path)
    }
}
