//! Openwild
//!
//! Populates a wilderness of recovered and freshly born profiles, then runs
//! it round by round and writes a snapshot after each round.

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wild_core::archive::{ContentSource, JsonArchive};
use wild_core::images::{DirectoryImageCatalog, FixedImageCatalog, ImageCatalog};
use wild_core::output::write_snapshot_to_dir;
use wild_core::{Corpus, Habitat, PopulationPlan, WildConfig};

/// Command line arguments for the wilderness
#[derive(Parser, Debug)]
#[command(name = "openwild")]
#[command(about = "A social wilderness of predators, foragers and abandoned blogs")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of rounds to run
    #[arg(long, default_value_t = 10)]
    rounds: u64,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the name and city lists (bundled lists if omitted)
    #[arg(long)]
    corpus_dir: Option<PathBuf>,

    /// JSON archive of recovered blogs (bundled archive if omitted)
    #[arg(long)]
    archive: Option<PathBuf>,

    /// Directory with one image folder per species
    #[arg(long)]
    images_dir: Option<PathBuf>,

    #[arg(long, default_value_t = 3)]
    predators: usize,

    #[arg(long, default_value_t = 12)]
    foragers: usize,

    #[arg(long, default_value_t = 2)]
    visitors: usize,

    /// Where snapshots are written
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("openwild=info".parse()?)
                .add_directive("wild_core=info".parse()?),
        )
        .init();

    if args.print_config {
        print!("{}", wild_core::config::default_config_toml());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => WildConfig::from_file(path)?,
        None => WildConfig::default(),
    };
    let corpus = match &args.corpus_dir {
        Some(dir) => Corpus::load(dir)?,
        None => Corpus::bundled()?,
    };
    let archive = match &args.archive {
        Some(path) => JsonArchive::from_file(path)?,
        None => JsonArchive::bundled()?,
    };
    if archive.is_empty() {
        warn!("Archive holds no blogs; abandoned profiles will have no history");
    } else {
        info!("Loaded {} archived blogs", archive.len());
    }
    let source: Box<dyn ContentSource> = Box::new(archive);
    let images: Box<dyn ImageCatalog> = match &args.images_dir {
        Some(dir) => Box::new(DirectoryImageCatalog::new(dir)),
        None => Box::new(FixedImageCatalog::from_config(&config.images)),
    };

    info!("Seed: {}, rounds: {}", args.seed, args.rounds);

    let mut habitat = Habitat::new(config, corpus, images, source, args.seed);
    let created = habitat.populate(PopulationPlan {
        predators: args.predators,
        foragers: args.foragers,
        visitors: args.visitors,
    })?;
    info!("Created {} profiles", created);

    let initial = habitat.snapshot();
    write_snapshot_to_dir(&initial, &args.output)?;

    for _ in 0..args.rounds {
        habitat.run_round()?;
        let snapshot = habitat.snapshot();
        if let Err(e) = write_snapshot_to_dir(&snapshot, &args.output) {
            warn!("Could not write snapshot for round {}: {}", snapshot.round, e);
        }
        if snapshot.living_active() == 0 {
            info!("No active profiles left after round {}", snapshot.round);
            break;
        }
    }

    let last = habitat.snapshot();
    info!(
        "Finished after {} rounds: {} of {} profiles alive, {} posts",
        last.round,
        last.living(),
        last.profile_count,
        last.post_count
    );
    Ok(())
}
