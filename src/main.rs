//! Regiongen CLI - query a deterministic region-based world from the shell.
//!
//! Samples every surface query for a block column, lists carved cave spans,
//! or prints the active configuration and stage order.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use tracing::Level;

use regiongen::layer::DataLayer;
use regiongen::{GeneratorConfig, WorldGenerator};

/// Deterministic region-based terrain generator.
#[derive(Parser)]
#[command(name = "regiongen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log region generation at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Random seed for reproducible generation.
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// TOML configuration file. `--seed` overrides its seed.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every surface query for one block column.
    Sample {
        /// Block X coordinate.
        #[arg(long, allow_hyphen_values = true)]
        x: i32,

        /// Block Z coordinate.
        #[arg(long, allow_hyphen_values = true)]
        z: i32,
    },

    /// Print the carved cave spans of one block column.
    Caves {
        /// Block X coordinate.
        #[arg(long, allow_hyphen_values = true)]
        x: i32,

        /// Block Z coordinate.
        #[arg(long, allow_hyphen_values = true)]
        z: i32,

        /// Lowest block to scan.
        #[arg(long, default_value = "-64", allow_hyphen_values = true)]
        min_y: i32,

        /// Highest block to scan.
        #[arg(long, default_value = "320", allow_hyphen_values = true)]
        max_y: i32,
    },

    /// Print the configuration and the stage order.
    Info,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    let config = match load_config(cli.config.as_ref(), cli.seed) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let world = match WorldGenerator::new(config) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("Error: invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Sample { x, z } => run_sample(&world, x, z),
        Commands::Caves { x, z, min_y, max_y } => run_caves(&world, x, z, min_y, max_y),
        Commands::Info => run_info(&world),
    }
}

fn load_config(path: Option<&PathBuf>, seed: Option<u64>) -> Result<GeneratorConfig, regiongen::ConfigError> {
    match (path, seed) {
        (Some(path), Some(seed)) => Ok(GeneratorConfig::from_toml_file(path)?.reseeded(seed)),
        (Some(path), None) => GeneratorConfig::from_toml_file(path),
        (None, seed) => Ok(GeneratorConfig::with_seed(seed.unwrap_or(42))),
    }
}

fn run_sample(world: &WorldGenerator, x: i32, z: i32) {
    let start = Instant::now();
    let point = world.point_at(x, z);
    let biome = world.biome_at(x, z);
    let rock = world.rock_at(x, z);
    let height = world.height_at(x, z);
    let (temperature, rainfall) = world.climate_at(x, z);
    let water = world.river_or_lake_at(x, z);
    let (ph, drainage) = world.soil_at(x, z);

    println!("Regiongen - column ({}, {})", x, z);
    println!("==============================");
    println!("Seed: {}", world.config().seed);
    if point.is_absent() {
        println!("Beyond the world bound");
    } else {
        println!("Grid point: ({}, {})", point.x, point.z);
    }
    println!("Biome: {}", biome.name());
    println!("Rock: {} ({})", rock.name(), rock.category().name());
    println!("Height: {}", height);
    println!("Temperature: {:.1} C", temperature);
    println!("Rainfall: {:.0} mm", rainfall);
    println!("River or lake: {}", water);
    println!("Soil: pH {}, drainage {}", ph.name(), drainage.name());
    if !point.is_absent() {
        println!("Distance to ocean: {}", point.distance_to_ocean);
        println!("Mountain: {}", point.mountain());
    }
    println!("\nDone in {:.2?} ({} regions generated)", start.elapsed(), world.generator().generated_count());
}

fn run_caves(world: &WorldGenerator, x: i32, z: i32, min_y: i32, max_y: i32) {
    if min_y > max_y {
        eprintln!("Error: --min-y must not exceed --max-y");
        std::process::exit(1);
    }

    let spans = world.caves().carved_spans(x, z, min_y, max_y);
    println!("Cave spans at ({}, {}), y {}..={}", x, z, min_y, max_y);
    if spans.is_empty() {
        println!("  (solid)");
    }
    for (bottom, top) in &spans {
        println!("  {:>4} .. {:>4}  ({} blocks)", bottom, top, top - bottom + 1);
    }
    let open: i32 = spans.iter().map(|(bottom, top)| top - bottom + 1).sum();
    println!("Open blocks: {} of {}", open, max_y - min_y + 1);
}

fn run_info(world: &WorldGenerator) {
    let config = world.config();
    println!("Regiongen configuration");
    println!("=======================");
    println!("Seed: {}", config.seed);
    println!("Grid width: {} blocks", config.grid_width);
    println!("Cell size: {} blocks ({} points per side)", config.cell_size, config.points_per_cell());
    match config.world_radius {
        Some(radius) => println!("World radius: {} blocks", radius),
        None => println!("World radius: unbounded"),
    }
    println!("Sea level: {}", config.sea_level);
    println!("\nStages:");
    for (i, id) in world.generator().pipeline().stage_ids().iter().enumerate() {
        println!("  {}. {}", i + 1, id.name());
    }
}
