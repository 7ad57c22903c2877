//! Results persistence module

use crate::filter::Facets;
use crate::graph::{build_adjacency, most_connected};
use crate::pipeline::AggregationOutput;
use crate::records::HasCost;
use anyhow::Result;
use serde::Serialize;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Number of institutions listed in the summary's ranking
const TOP_COLLABORATORS: usize = 10;

/// Save aggregation results to the specified directory
pub fn save_results<R: HasCost + Serialize>(
    output: &AggregationOutput<R>,
    facets: &Facets,
    output_dir: &Path,
) -> Result<()> {
    log::info!("Saving {} location groups to {}", output.groups.len(), output_dir.display());

    fs::create_dir_all(output_dir)?;

    save_summary(output, facets, output_dir)?;
    write_json(&output_dir.join("groups.json"), &output.groups)?;
    write_json(&output_dir.join("edges.json"), &output.filtered_edges)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save scalar summaries, per-location statistics and facets
fn save_summary<R: HasCost>(output: &AggregationOutput<R>, facets: &Facets, output_dir: &Path) -> Result<()> {
    log::info!("Saving summary information");

    let adjacency = build_adjacency(&output.filtered_edges)?;
    let top = most_connected(&adjacency, TOP_COLLABORATORS);

    let summary = json!({
        "visible_count": output.visible_count,
        "total_funding": output.total_funding,
        "location_count": output.groups.len(),
        "collaboration_count": output.filtered_edges.len(),
        "institutions_in_graph": adjacency.node_count(),
        "most_connected": top
            .iter()
            .map(|(id, degree)| json!({ "id": id, "degree": degree }))
            .collect::<Vec<_>>(),
        "locations": output.group_summaries(),
        "facets": facets,
    });

    write_json(&output_dir.join("summary.json"), &summary)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(value)?.as_bytes())?;
    Ok(())
}
