//! # relief-dem
//!
//! On-demand terrain elevation tiles routed across heterogeneous elevation
//! sources.
//!
//! An [`ElevationManager`] holds an ordered registry of drivers. For each
//! requested region it finds the first driver reporting coverage and
//! delegates tile creation to it. Two drivers are provided:
//!
//! - [`FlatSource`]: constant elevation, universal coverage
//! - [`ArchiveSource`]: SRTM-style tiled raster archives (`.hgt`, GeoTIFF),
//!   indexed at initialization and lazily loaded on first query
//!
//! ## Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use relief_dem::{ArchiveSource, ElevationManager, FlatSource, RasterSize};
//! use relief_geo::{Datum, GroundPosition, UtmCoordinate};
//!
//! let mut archive = ArchiveSource::new([PathBuf::from("/data/srtm")]);
//! archive.initialize()?;
//!
//! let mut manager = ElevationManager::new();
//! manager.add_driver(Arc::new(archive));
//! manager.add_driver(Arc::new(FlatSource::new(0.0))); // sea-level fallback
//!
//! let corner = GroundPosition::Utm(
//!     UtmCoordinate::new(10, true, 550_000.0, 5_270_000.0, 0.0, Datum::Wgs84)?,
//! );
//! let tile = manager.create_tile(&corner, RasterSize::new(256, 256), 30.0)?;
//! println!("elevation range: {:?}", tile.min_max());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod archive;
mod config;
mod driver;
mod error;
mod flat;
mod manager;
mod raster;
mod reader;
mod tile;

pub use archive::{ArchiveSource, SourceState};
pub use config::{build_drivers, DriverConfig, DriverSpec};
pub use driver::{ElevationSource, RasterSize};
pub use error::DemError;
pub use flat::FlatSource;
pub use manager::ElevationManager;
pub use raster::Raster;
pub use reader::{is_supported_source, reader_for, GeoTiffReader, HgtReader, RasterReader};
pub use tile::ElevationTile;

/// Result type for elevation operations.
pub type Result<T> = std::result::Result<T, DemError>;
