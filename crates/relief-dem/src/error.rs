//! Error types for the elevation stack.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when resolving elevation data.
///
/// Variants are the reason codes surfaced to callers; the display string is
/// the human-readable detail. Drivers report failures to their immediate
/// caller and never abort the process.
#[derive(Debug, Error)]
pub enum DemError {
    /// I/O error reading a source file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF decoding error.
    #[error("TIFF decode error: {0}")]
    TiffDecode(#[from] tiff::TiffError),

    /// Coordinate construction or conversion error.
    #[error(transparent)]
    Geo(#[from] relief_geo::GeoError),

    /// Driver configuration parse error.
    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Operation on a driver that has not completed initialization.
    #[error("elevation driver is not initialized")]
    Uninitialized,

    /// A configured source path does not exist.
    #[error("path does not exist: {0}")]
    PathDoesNotExist(PathBuf),

    /// Initialization found no usable source files.
    #[error("no valid elevation sources found under the configured paths")]
    NoValidSources,

    /// No registered driver covers the requested region.
    #[error("no terrain coverage for the requested region")]
    NoTerrainCoverage,

    /// No source extent contains the queried point.
    #[error("no elevation source covers ({lat}, {lon})")]
    NoCoverage {
        /// Requested latitude.
        lat: f64,
        /// Requested longitude.
        lon: f64,
    },

    /// A mapped sample position fell outside the raster grid.
    #[error("sample ({x:.3}, {y:.3}) is outside raster bounds {cols}x{rows}")]
    OutOfBounds {
        /// Fractional pixel x.
        x: f64,
        /// Fractional pixel y.
        y: f64,
        /// Raster columns.
        cols: usize,
        /// Raster rows.
        rows: usize,
    },

    /// The sampled value is the raster's declared nodata.
    #[error("no elevation data at ({lat}, {lon})")]
    NoData {
        /// Requested latitude.
        lat: f64,
        /// Requested longitude.
        lon: f64,
    },

    /// The operation is not provided by this driver.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// Source filename does not encode a cell position.
    #[error("invalid source filename: {0}")]
    InvalidFilename(String),

    /// GeoTIFF is missing required georeferencing.
    #[error("invalid GeoTIFF: {0}")]
    InvalidGeoTiff(String),

    /// SRTM archive file is malformed.
    #[error("invalid HGT file {path}: {reason}")]
    InvalidHgt {
        /// Offending file.
        path: PathBuf,
        /// What made it unusable.
        reason: String,
    },

    /// No reader exists for the file's extension.
    #[error("unsupported archive format: {0}")]
    UnsupportedArchiveFormat(PathBuf),

    /// Pixel buffer does not match the declared dimensions.
    #[error("raster data length {len} does not match {rows}x{cols}")]
    RasterShape {
        /// Provided buffer length.
        len: usize,
        /// Declared rows.
        rows: usize,
        /// Declared columns.
        cols: usize,
    },
}
