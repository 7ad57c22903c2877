//! Parquet file handling for collaboration edges

use crate::graph::Edge;
use anyhow::Result;
use polars::prelude::*;
use std::path::Path;

/// Load collaboration rows with `institution_a`, `institution_b` and an
/// optional numeric `weight` column. Rows with a null endpoint are skipped.
pub fn load_edges(path: &Path) -> Result<Vec<Edge>> {
    log::info!("Reading parquet file: {}", path.display());

    if !path.exists() {
        return Err(anyhow::anyhow!("File not found: {}", path.display()));
    }

    let df = LazyFrame::scan_parquet(path, Default::default())?.collect()?;
    log::info!("File schema: {:?}", df.schema());

    // Ids may be stored as integers; compare them as strings
    let a_col = df.column("institution_a")?.cast(&DataType::String)?;
    let b_col = df.column("institution_b")?.cast(&DataType::String)?;
    let a_ids = a_col.str()?;
    let b_ids = b_col.str()?;

    let weights = match df.column("weight") {
        Ok(column) => Some(column.as_materialized_series().cast(&DataType::Float64)?),
        Err(_) => None,
    };
    let weights = weights.as_ref().map(|series| series.f64()).transpose()?;

    let mut edges = Vec::with_capacity(df.height());
    let mut skipped = 0usize;

    for i in 0..df.height() {
        let (Some(a), Some(b)) = (a_ids.get(i), b_ids.get(i)) else {
            skipped += 1;
            continue;
        };

        let mut edge = Edge::new(a, b);
        edge.weight = weights.and_then(|w| w.get(i));
        edge.validate()?;
        edges.push(edge);
    }

    if skipped > 0 {
        log::warn!("Skipped {} rows with a missing institution id", skipped);
    }
    log::info!("Loaded {} collaboration edges", edges.len());

    Ok(edges)
}
