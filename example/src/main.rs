//! K-Means clusterization example
//! Loads or generates a dataset, fits a model with a fixed iteration budget,
//! prints the cluster of every point and optionally writes csv/json results

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use kmeans::{metrics::{cluster_sizes, inertia}, Kmeans, Point};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

use crate::context::{ClusterizationContext, DataSource, DEFAULT_DIM_SIZE, DEFAULT_K, DEFAULT_MAX_ITERATION, DEFAULT_SEED};
use crate::csv::{write_assigned, write_clusters_base, write_summary, RunSummary};
use crate::loading::load_data;

// Module declarations
mod context;
mod csv;
mod loading;

/// Command-line arguments for the clusterization program
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of clusters (default: 3)
    #[arg(long)]
    pub k: Option<usize>,
    /// Number of Lloyd iterations, always fully executed (default: 100)
    #[arg(long)]
    pub max_iter: Option<usize>,
    /// Path to a JSON file with an array of points, e.g. [[1.0, 2.0], [1.5, 1.8]]
    #[arg(long, conflicts_with = "synthetic")]
    pub data: Option<PathBuf>,
    /// Generate this many points from k gaussian blobs instead of loading data
    #[arg(long)]
    pub synthetic: Option<usize>,
    /// Dimension of synthetic points (default: 2)
    #[arg(long)]
    pub dimension: Option<usize>,
    /// Seed for synthetic data (default: 0)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output directory for assigned.csv, centroid.csv and report.json
    #[arg(long)]
    pub outdir: Option<PathBuf>,
    /// Log every training iteration
    #[arg(long)]
    pub verbose: bool,
}

impl From<Args> for ClusterizationContext {
    fn from(args: Args) -> Self {
        let source = match (args.data, args.synthetic) {
            (Some(path), _) => DataSource::Json(path),
            (None, Some(n)) => DataSource::Synthetic(
                n,
                args.dimension.unwrap_or(DEFAULT_DIM_SIZE),
                args.seed.unwrap_or(DEFAULT_SEED),
            ),
            (None, None) => DataSource::Reference,
        };
        Self {
            source,
            k: args.k.unwrap_or(DEFAULT_K),
            max_iteration: args.max_iter.unwrap_or(DEFAULT_MAX_ITERATION),
            outdir: args.outdir,
        }
    }
}

fn init_logger(verbose: bool) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto)
        .map_err(|e| anyhow!("initializing logger: {}", e))
}

fn format_point(point: &Point<f64>) -> String {
    point.coords().iter().map(|c| format!("{:.2}", c)).collect::<Vec<_>>().join(", ")
}

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();
    init_logger(args.verbose)?;
    let context = ClusterizationContext::from(args);
    log::debug!("{:?}", context);

    let data = load_data(&context.source, context.k)?;
    let dim_size = data.first().map(|p| p.dimension()).unwrap_or(DEFAULT_DIM_SIZE);
    log::info!("loaded {} points of dimension {}", data.len(), dim_size);

    let mut model = Kmeans::new(context.k, dim_size).context("creating model")?;
    let report = model.train(&data, context.max_iteration).context("training model")?;
    let labels = model.predict(&data).context("predicting labels")?;

    println!("Clustering results:");
    for (point, label) in data.iter().zip(labels.iter()) {
        println!("Point ({}) belongs to cluster {}", format_point(point), label);
    }

    if let Some(outdir) = &context.outdir {
        std::fs::create_dir_all(outdir)
            .with_context(|| format!("creating output directory {}", outdir.display()))?;
        let score = inertia(&data, &model, &labels)?;
        let sizes = cluster_sizes(&labels, model.k())?;
        write_assigned(&labels, outdir, "assigned")?;
        write_clusters_base(model.centroids(), outdir, "centroid")?;
        write_summary(&RunSummary::new(&model, &report, data.len(), score, sizes), outdir, "report")?;
        log::info!("results written to {}", outdir.display());
    }

    model.destroy();
    Ok(())
}
