//! Point locator command.
//!
//! Finds the zip code tabulation area, LEPC district and county containing
//! a latitude/longitude and writes their names to a text file.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use polylocator::config::Config;
use polylocator::job::locate_to_file;
use polylocator::pip::LayerIndex;
use polylocator::{Coordinate, LayerKey, LocateError, PointLocator};

#[derive(Parser, Debug)]
#[command(name = "locate")]
#[command(about = "Find the zip, LEPC and county polygons containing a point")]
struct Args {
    /// Latitude in decimal degrees (NAD83)
    #[arg(allow_hyphen_values = true)]
    latitude: String,

    /// Longitude in decimal degrees (NAD83)
    #[arg(allow_hyphen_values = true)]
    longitude: String,

    /// Zip code tabulation area layer (GeoJSON, optionally .gz)
    zip_layer: PathBuf,

    /// LEPC district layer (GeoJSON, optionally .gz)
    lepc_layer: PathBuf,

    /// County layer (GeoJSON, optionally .gz)
    county_layer: PathBuf,

    /// Output text file, truncated on open
    output: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// File that receives the error message when a run fails
    #[arg(long)]
    error_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// Run once. Any failure, config loading included, is logged at warn level,
/// written to the error file when one is set, and returned as the message.
fn execute(args: &Args) -> Result<(), String> {
    let mut error_file = args.error_file.clone();

    let outcome = load_config(args).and_then(|config| {
        if error_file.is_none() {
            error_file = config.error_file.clone();
        }
        run(args, config).map_err(anyhow::Error::from)
    });

    outcome.map_err(|err| {
        let message = error_message(&err);
        warn!("{}", message);
        if let Some(path) = &error_file {
            report_error(path, &message);
        }
        message
    })
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => Config::load_from_file(path),
        None => Ok(Config::default()),
    }
}

fn error_message(err: &anyhow::Error) -> String {
    // LocateError messages already include their cause
    match err.downcast_ref::<LocateError>() {
        Some(e) => e.to_string(),
        None => format!("{:#}", err),
    }
}

fn run(args: &Args, config: Config) -> Result<(), LocateError> {
    let coordinate = Coordinate::parse(&args.latitude, &args.longitude)?;
    let point = coordinate.to_point()?;
    info!("Point of interest: ({}, {})", point.lat(), point.lon());

    let zip = load_layer(LayerKey::Zip, &args.zip_layer)?;
    let lepc = load_layer(LayerKey::Lepc, &args.lepc_layer)?;
    let county = load_layer(LayerKey::County, &args.county_layer)?;
    let locator = PointLocator::with_fields(zip, lepc, county, config.fields);

    let report = locate_to_file(&locator, &point, &args.output)?;
    for (key, name) in report.result.iter() {
        info!("{} = {}", key, name);
    }

    Ok(())
}

fn load_layer(layer: LayerKey, path: &Path) -> Result<LayerIndex, LocateError> {
    LayerIndex::load(layer.as_str(), path).map_err(|source| LocateError::LayerLoad {
        layer,
        path: path.to_path_buf(),
        source,
    })
}

fn report_error(path: &Path, message: &str) {
    if let Err(e) = fs::write(path, format!("{}\n", message)) {
        warn!("Could not write error file {}: {}", path.display(), e);
    }
}
