use anyhow::{Context, Result};
use clap::Parser;
use research_map_engine::cache::ResponseCache;
use research_map_engine::config::{EngineConfig, RecordKind};
use research_map_engine::data;
use research_map_engine::filter::{resolve_search, Facets, FilterCriteria};
use research_map_engine::graph::Edge;
use research_map_engine::pipeline::{AggregationOutput, AggregationPipeline};
use research_map_engine::records::{FilterableRecord, HasCost, HasGeolocation, Institution, Project, Searchable};
use research_map_engine::storage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "research-map-engine",
    about = "Aggregate research funding records into map-ready location groups"
)]
struct Cli {
    /// Path to a JSON array of institution or project records
    #[clap(long)]
    records: PathBuf,

    /// Path to collaboration edges (JSON array or .parquet)
    #[clap(long)]
    edges: Option<PathBuf>,

    /// Kind of records in the input file
    #[clap(long, value_enum, default_value = "institutions")]
    kind: RecordKind,

    /// Output directory for results
    #[clap(long, default_value = "aggregation_results")]
    output_dir: PathBuf,

    /// Optional JSON engine configuration
    #[clap(long)]
    config: Option<PathBuf>,

    /// Country codes to keep (comma separated)
    #[clap(long, value_delimiter = ',')]
    countries: Vec<String>,

    /// First year of the activity window
    #[clap(long, requires = "year_max")]
    year_min: Option<i32>,

    /// Last year of the activity window
    #[clap(long, requires = "year_min")]
    year_max: Option<i32>,

    /// Minimum total cost
    #[clap(long, default_value = "0")]
    min_budget: f64,

    /// Minimum number of distinct collaborators
    #[clap(long, default_value = "0")]
    min_connections: usize,

    /// Topic ids to keep (comma separated, "null" keeps untagged records)
    #[clap(long, value_delimiter = ',')]
    topics: Vec<String>,

    /// Framework programmes to keep (comma separated)
    #[clap(long, value_delimiter = ',')]
    framework_programmes: Vec<String>,

    /// Free-text search over names and titles
    #[clap(long)]
    search: Option<String>,

    /// Round coordinates to this many decimals before grouping
    #[clap(long)]
    precision: Option<u32>,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if args.precision.is_some() {
        config.coordinate_precision = args.precision;
    }
    config.validate()?;
    args.kind
        .check_graph_options(args.edges.is_some(), args.min_connections)?;

    log::info!("Starting aggregation");
    log::info!("Records: {}", args.records.display());
    log::info!("Output: {}", args.output_dir.display());

    let edges = match &args.edges {
        Some(path) => data::load_edges(path)?,
        None => Vec::new(),
    };

    match args.kind {
        RecordKind::Institutions => run::<Institution>(&args, &config, &edges),
        RecordKind::Projects => run::<Project>(&args, &config, &edges),
    }
}

fn run<R>(args: &Cli, config: &EngineConfig, edges: &[Edge]) -> Result<()>
where
    R: FilterableRecord + HasGeolocation + HasCost + Searchable + Clone + Serialize + DeserializeOwned,
{
    let records: Vec<R> = data::json::load_records(&args.records)?;
    let facets = Facets::collect(&records);

    let search_ids = args
        .search
        .as_deref()
        .and_then(|query| resolve_search(&records, query));

    let mut criteria = FilterCriteria::new()
        .with_countries(args.countries.iter().cloned())
        .with_min_budget(args.min_budget)
        .with_min_connections(args.min_connections)
        .with_topics(args.topics.iter().cloned())
        .with_framework_programmes(args.framework_programmes.iter().cloned())
        .with_search_ids(search_ids);
    if let (Some(min), Some(max)) = (args.year_min, args.year_max) {
        criteria = criteria.with_year_range(min, max);
    }

    // The one cache for this process
    let mut cache: ResponseCache<AggregationOutput<R>> = ResponseCache::from_config(config);
    let pipeline = AggregationPipeline::from_config(args.kind.cache_key(), config);

    let output = pipeline
        .run(&mut cache, &records, edges, &criteria)
        .context("aggregating records")?;

    log::info!(
        "{} visible records in {} locations, total funding {:.2}",
        output.visible_count,
        output.groups.len(),
        output.total_funding
    );

    storage::save_results(&output, &facets, &args.output_dir)?;

    log::info!("Aggregation complete. Results saved to {}", args.output_dir.display());

    Ok(())
}
