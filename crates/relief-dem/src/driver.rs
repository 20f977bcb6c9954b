//! The elevation-source capability contract.

use std::fmt;

use relief_geo::{GeographicCoordinate, GroundPosition};

use crate::{ElevationTile, Result};

/// Pixel dimensions of a requested tile: `width` maps to columns, `height`
/// to rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterSize {
    /// Columns in the output raster.
    pub width: usize,
    /// Rows in the output raster.
    pub height: usize,
}

impl RasterSize {
    /// Create a size from width (columns) and height (rows).
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// A source of terrain elevation data.
///
/// Implementations answer coverage queries for points and rectangular
/// regions, sample single-point elevations, and synthesize elevation tiles.
/// All operations are synchronous; failures surface as [`crate::DemError`]
/// values rather than panics.
pub trait ElevationSource: fmt::Debug + Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Whether the driver completed initialization and can serve queries.
    fn is_ready(&self) -> bool;

    /// Whether the driver can answer an elevation query at a single point.
    fn covers_point(&self, point: &GeographicCoordinate) -> bool;

    /// Whether the driver can service the entire rectangular region spanned
    /// by `min` and `max`.
    fn covers_region(&self, min: &GroundPosition, max: &GroundPosition) -> bool;

    /// Synthesize an elevation tile of `size` pixels at `gsd_m` meters per
    /// pixel, anchored at the given bottom-left corner.
    fn create_tile(
        &self,
        min_corner: &GroundPosition,
        size: RasterSize,
        gsd_m: f64,
    ) -> Result<ElevationTile>;

    /// Sample the elevation at a single point, in meters.
    fn query_elevation(&self, point: &GeographicCoordinate) -> Result<f64>;
}
