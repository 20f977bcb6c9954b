//! Command-line elevation queries against a configured driver stack.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use relief_dem::{build_drivers, DriverConfig, ElevationManager, RasterSize};
use relief_geo::{Datum, GeographicCoordinate, GroundPosition, UtmCoordinate};

#[derive(Parser)]
#[command(name = "relief", about = "Terrain elevation queries and tile cutting")]
struct Cli {
    /// Driver configuration file (YAML).
    #[arg(short, long, global = true, default_value = "relief.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Query the elevation at a geographic point.
    Query {
        /// Latitude in decimal degrees (positive = north).
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees (positive = east).
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Cut an elevation tile anchored at a UTM bottom-left corner.
    Tile {
        /// UTM zone (1-60).
        #[arg(long)]
        zone: u8,
        /// Southern hemisphere (northern is the default).
        #[arg(long)]
        south: bool,
        /// Easting of the bottom-left corner in meters.
        #[arg(long)]
        easting: f64,
        /// Northing of the bottom-left corner in meters.
        #[arg(long)]
        northing: f64,
        /// Output width in pixels.
        #[arg(long, default_value_t = 256)]
        width: usize,
        /// Output height in pixels.
        #[arg(long, default_value_t = 256)]
        height: usize,
        /// Ground-sample distance in meters per pixel.
        #[arg(long, default_value_t = 30.0)]
        gsd: f64,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = DriverConfig::load(&cli.config)?;
    let mut manager = ElevationManager::new();
    manager.add_drivers(build_drivers(&config));
    if manager.driver_count() == 0 {
        return Err("no ready elevation drivers configured".into());
    }

    match cli.command {
        Command::Query { lat, lon } => {
            let point = GeographicCoordinate::new(lat, lon, 0.0, Datum::Wgs84)?;
            let driver = manager
                .drivers()
                .iter()
                .find(|d| d.covers_point(&point))
                .ok_or("no driver covers the requested point")?;
            let elevation = driver.query_elevation(&point)?;
            println!("{elevation:.2} m");
        }
        Command::Tile {
            zone,
            south,
            easting,
            northing,
            width,
            height,
            gsd,
        } => {
            let corner = GroundPosition::Utm(UtmCoordinate::new(
                zone,
                !south,
                easting,
                northing,
                0.0,
                Datum::Wgs84,
            )?);
            let tile = manager.create_tile(&corner, RasterSize::new(width, height), gsd)?;

            println!(
                "tile {}x{} px at {} m/px",
                tile.cols(),
                tile.rows(),
                tile.gsd()
            );
            println!("  bottom-left: {}", tile.corner_bl());
            println!("  top-right:   {}", tile.corner_tr());
            match tile.min_max() {
                Some((lo, hi)) => println!("  elevation:   {lo:.1} m to {hi:.1} m"),
                None => println!("  elevation:   no data"),
            }
        }
    }
    Ok(())
}
