//! Wayside analyzer CLI
//!
//! Matches a train GPS track against wayside asset locations and reports the
//! speed observed at each asset.

mod report;

use clap::Parser;
use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use wayside_core::{match_assets, GridConfig, GridIndex, MatchConfig};
use wayside_tabular::{read_assets_file, read_track_file};

/// Wayside track-to-asset speed analyzer
#[derive(Parser, Debug)]
#[command(name = "wayside")]
#[command(about = "Match a GPS track against wayside assets and report speeds", long_about = None)]
struct Args {
    /// Track CSV (logging_time, latitude, longitude, speed columns)
    #[arg(short, long)]
    track: PathBuf,

    /// Asset CSV (structure_id, latitude, longitude columns)
    #[arg(short, long)]
    assets: PathBuf,

    /// Maximum matching distance in meters
    #[arg(short = 'd', long, default_value = "50.0")]
    max_distance: f64,

    /// Grid cell size in degrees
    #[arg(long, default_value = "0.001")]
    cell_size: f64,

    /// Write per-asset results CSV to this path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the summary as JSON instead of a text block
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if let Err(err) = run(&args) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let grid_config = GridConfig::with_cell_size(args.cell_size)?;
    let match_config = MatchConfig {
        max_distance_m: args.max_distance,
    };

    let fixes = read_track_file(&args.track)?;
    let assets = read_assets_file(&args.assets)?;

    let index = GridIndex::build(fixes, grid_config);
    let stats = index.stats();
    info!(
        fixes = stats.total_fixes,
        cells = stats.occupied_cells,
        avg_per_cell = format!("{:.1}", stats.avg_fixes_per_cell),
        "track indexed"
    );

    let report = match_assets(&index, &assets, &match_config)?;
    info!(
        matched = report.summary.matched_count,
        total = report.summary.total_assets,
        "matching complete"
    );

    match &args.output {
        Some(path) => {
            report::write_results_csv(File::create(path)?, &report.results)?;
            info!(path = %path.display(), "results written");
        }
        None => report::write_results_csv(io::stdout().lock(), &report.results)?,
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.summary)?);
    } else {
        print!("{}", report::render_summary(&report.summary));
    }

    Ok(())
}
