//! Constant-elevation driver.

use relief_geo::{GeographicCoordinate, GroundPosition};

use crate::{ElevationSource, ElevationTile, Raster, RasterSize, Result};

/// A driver that reports one constant elevation everywhere.
///
/// Useful as a universal fallback behind archive drivers, or as the sole
/// source for simulations over idealized flat terrain.
#[derive(Debug, Clone)]
pub struct FlatSource {
    elevation_m: f64,
}

impl FlatSource {
    /// Create a flat source at the given elevation in meters.
    pub fn new(elevation_m: f64) -> Self {
        Self { elevation_m }
    }

    /// The constant elevation in meters.
    pub fn elevation(&self) -> f64 {
        self.elevation_m
    }
}

impl ElevationSource for FlatSource {
    fn name(&self) -> &str {
        "flat"
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn covers_point(&self, _point: &GeographicCoordinate) -> bool {
        true
    }

    fn covers_region(&self, _min: &GroundPosition, _max: &GroundPosition) -> bool {
        true
    }

    fn create_tile(
        &self,
        min_corner: &GroundPosition,
        size: RasterSize,
        gsd_m: f64,
    ) -> Result<ElevationTile> {
        let raster = Raster::filled(size.height, size.width, self.elevation_m as f32);
        Ok(ElevationTile::new(raster, gsd_m, *min_corner))
    }

    fn query_elevation(&self, _point: &GeographicCoordinate) -> Result<f64> {
        Ok(self.elevation_m)
    }
}
