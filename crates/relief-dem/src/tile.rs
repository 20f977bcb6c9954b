//! The elevation tile artifact returned to callers.

use relief_geo::GroundPosition;

use crate::Raster;

/// A rectangular, uniformly-sampled elevation raster.
///
/// Anchored at its bottom-left corner: row 0 is the southern row, and
/// sample `(row, col)` sits at `corner + (col * gsd, row * gsd)` along the
/// planar axes of the corner's representation. Tiles are independent
/// copies; they stay valid after the driver that produced them is gone.
#[derive(Debug, Clone)]
pub struct ElevationTile {
    raster: Raster,
    gsd_m: f64,
    corner: GroundPosition,
}

impl ElevationTile {
    /// Assemble a tile from its raster, ground-sample distance, and
    /// bottom-left corner.
    pub fn new(raster: Raster, gsd_m: f64, corner: GroundPosition) -> Self {
        Self {
            raster,
            gsd_m,
            corner,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.raster.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.raster.cols()
    }

    /// Ground-sample distance in meters per pixel.
    pub fn gsd(&self) -> f64 {
        self.gsd_m
    }

    /// The bottom-left corner.
    pub fn corner_bl(&self) -> GroundPosition {
        self.corner
    }

    /// The top-left corner.
    pub fn corner_tl(&self) -> GroundPosition {
        self.corner.offset(0.0, self.rows() as f64 * self.gsd_m)
    }

    /// The top-right corner.
    pub fn corner_tr(&self) -> GroundPosition {
        self.corner.offset(
            self.cols() as f64 * self.gsd_m,
            self.rows() as f64 * self.gsd_m,
        )
    }

    /// The bottom-right corner.
    pub fn corner_br(&self) -> GroundPosition {
        self.corner.offset(self.cols() as f64 * self.gsd_m, 0.0)
    }

    /// The ground position of sample `(row, col)`.
    pub fn coordinate_at(&self, row: usize, col: usize) -> GroundPosition {
        self.corner
            .offset(col as f64 * self.gsd_m, row as f64 * self.gsd_m)
    }

    /// Read the elevation sample at `(row, col)` in meters.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.raster.get(row, col)
    }

    /// The underlying raster, for bulk operations.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Minimum and maximum elevation across the tile.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.raster.min_max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_geo::{Datum, UtmCoordinate};

    fn utm(easting: f64, northing: f64) -> GroundPosition {
        GroundPosition::Utm(
            UtmCoordinate::new(10, true, easting, northing, 0.0, Datum::Wgs84).unwrap(),
        )
    }

    fn planar(position: GroundPosition) -> (f64, f64) {
        match position {
            GroundPosition::Utm(c) => (c.easting(), c.northing()),
            GroundPosition::Geographic(c) => (c.longitude(), c.latitude()),
        }
    }

    #[test]
    fn corner_arithmetic() {
        // 1024x2048 pixels at 0.25 m/px anchored at (1, 2).
        let tile = ElevationTile::new(Raster::filled(2048, 1024, 0.0), 0.25, utm(1.0, 2.0));

        assert_eq!(tile.rows(), 2048);
        assert_eq!(tile.cols(), 1024);
        assert_eq!(planar(tile.corner_bl()), (1.0, 2.0));
        assert_eq!(planar(tile.corner_tl()), (1.0, 514.0));
        assert_eq!(planar(tile.corner_tr()), (257.0, 514.0));
        assert_eq!(planar(tile.corner_br()), (257.0, 2.0));
    }

    #[test]
    fn coordinate_at_scales_by_gsd() {
        let tile = ElevationTile::new(Raster::filled(4, 4, 0.0), 30.0, utm(500_000.0, 5_000_000.0));
        let (x, y) = planar(tile.coordinate_at(2, 3));
        assert_eq!(x, 500_090.0);
        assert_eq!(y, 5_000_060.0);
    }
}
