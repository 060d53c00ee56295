//! Retrieval-quality and index-behavior experiments over image features.
//!
//! Each subcommand prints a single number (or writes files, for `extract`),
//! so runs compose with shell pipelines and result-collection scripts.

mod dataset;
mod extract;
mod runs;

use std::path::PathBuf;

use anyhow::Result;
use bauxite::{DEFAULT_MAX_ENTRIES, DEFAULT_MIN_ENTRIES};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::dataset::Dataset;
use crate::extract::Method;

#[derive(Parser)]
#[command(
    name = "bauxite-experiments",
    about = "Retrieval-quality and index-behavior experiments for bauxite",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mean precision of k-nearest-neighbor retrieval by image category.
    Accuracy(AccuracyArgs),
    /// Mean recall of k-nearest-neighbor retrieval by image category.
    Recall(RecallArgs),
    /// Mean node visits of random window queries against a sampled tree.
    DiskAccess(DiskAccessArgs),
    /// Node splits observed while building a sampled tree.
    SplitCount(SplitCountArgs),
    /// Extract feature vectors from a directory of images.
    Extract(ExtractArgs),
}

#[derive(Args)]
struct DatasetArgs {
    /// Feature file, one whitespace-separated record per line.
    #[arg(long)]
    features: PathBuf,

    /// Image list file, position-aligned with the feature file.
    #[arg(long)]
    images: PathBuf,

    /// Number of values per feature record.
    #[arg(long)]
    dimension: usize,
}

impl DatasetArgs {
    fn load(&self) -> Result<Dataset> {
        Dataset::load(&self.features, &self.images, self.dimension)
    }
}

#[derive(Args)]
struct AccuracyArgs {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Neighbors to retrieve per query.
    #[arg(long)]
    k: usize,

    /// Maximum entries per node.
    #[arg(long, default_value_t = DEFAULT_MAX_ENTRIES)]
    max_entries: usize,

    /// Minimum entries per non-root node.
    #[arg(long, default_value_t = DEFAULT_MIN_ENTRIES)]
    min_entries: usize,
}

#[derive(Args)]
struct RecallArgs {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Maximum entries per node.
    #[arg(long, default_value_t = DEFAULT_MAX_ENTRIES)]
    max_entries: usize,

    /// Minimum entries per non-root node.
    #[arg(long, default_value_t = DEFAULT_MIN_ENTRIES)]
    min_entries: usize,
}

#[derive(Args)]
struct DiskAccessArgs {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Records to draw from the dataset.
    #[arg(long)]
    size: usize,

    /// Maximum entries per node.
    #[arg(long)]
    max_entries: usize,

    /// Minimum entries per non-root node.
    #[arg(long)]
    min_entries: usize,

    /// Window queries to run.
    #[arg(long, default_value_t = 1024)]
    queries: usize,

    /// Seed for record sampling and query placement.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct SplitCountArgs {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Records to draw from the dataset.
    #[arg(long)]
    size: usize,

    /// Maximum entries per node.
    #[arg(long)]
    max_entries: usize,

    /// Minimum entries per non-root node.
    #[arg(long)]
    min_entries: usize,

    /// Seed for record sampling.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct ExtractArgs {
    /// Directory of images to decode, processed in name order.
    #[arg(long)]
    images_dir: PathBuf,

    /// Feature file to write; the image list lands next to it with
    /// extension `images.txt`.
    #[arg(long)]
    output: PathBuf,

    /// Feature to extract per image.
    #[arg(long, value_enum)]
    method: Method,

    /// Histogram buckets per channel (rgb and hsl methods).
    #[arg(long, default_value_t = 8)]
    bins: usize,

    /// Grid columns (grid method).
    #[arg(long, default_value_t = 4)]
    cols: u32,

    /// Grid rows (grid method).
    #[arg(long, default_value_t = 4)]
    rows: u32,
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Accuracy(args) => {
            let dataset = args.dataset.load()?;
            let value = runs::accuracy(&dataset, args.k, args.max_entries, args.min_entries)?;
            println!("{value}");
        }
        Commands::Recall(args) => {
            let dataset = args.dataset.load()?;
            let value = runs::recall(&dataset, args.max_entries, args.min_entries)?;
            println!("{value}");
        }
        Commands::DiskAccess(args) => {
            let dataset = args.dataset.load()?;
            let mut rng = rng_from(args.seed);
            let value = runs::disk_access(
                &dataset,
                args.size,
                args.max_entries,
                args.min_entries,
                args.queries,
                &mut rng,
            )?;
            println!("{value}");
        }
        Commands::SplitCount(args) => {
            let dataset = args.dataset.load()?;
            let mut rng = rng_from(args.seed);
            let value = runs::split_count(
                &dataset,
                args.size,
                args.max_entries,
                args.min_entries,
                &mut rng,
            )?;
            println!("{value}");
        }
        Commands::Extract(args) => {
            extract::extract(
                &args.images_dir,
                &args.output,
                args.method,
                args.bins,
                args.cols,
                args.rows,
            )?;
        }
    }

    Ok(())
}
