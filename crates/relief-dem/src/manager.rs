//! Ordered driver registry and coverage dispatch.

use std::sync::Arc;

use relief_geo::GroundPosition;
use tracing::{debug, warn};

use crate::{DemError, ElevationSource, ElevationTile, RasterSize, Result};

/// An explicitly constructed registry of elevation drivers.
///
/// Drivers are scanned in registration order; the first one reporting
/// coverage for a requested region services it. The registry is append-only:
/// once populated it can be shared freely for lookups.
#[derive(Debug, Default)]
pub struct ElevationManager {
    drivers: Vec<Arc<dyn ElevationSource>>,
}

impl ElevationManager {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a driver. Drivers that do not report themselves ready are
    /// rejected and the registry is left unchanged.
    pub fn add_driver(&mut self, driver: Arc<dyn ElevationSource>) {
        if !driver.is_ready() {
            warn!(driver = driver.name(), "rejecting driver that is not ready");
            return;
        }
        self.drivers.push(driver);
    }

    /// Append several drivers, applying the same readiness rule per element.
    pub fn add_drivers(&mut self, drivers: impl IntoIterator<Item = Arc<dyn ElevationSource>>) {
        for driver in drivers {
            self.add_driver(driver);
        }
    }

    /// Number of registered drivers.
    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    /// The registered drivers, in registration order.
    pub fn drivers(&self) -> &[Arc<dyn ElevationSource>] {
        &self.drivers
    }

    /// Create an elevation tile of `size` pixels at `gsd_m` meters per
    /// pixel, anchored at `min_corner`.
    ///
    /// The request's maximum corner is `min_corner + (width*gsd,
    /// height*gsd)` in the corner's own representation. The first driver
    /// whose coverage test accepts the region receives the delegated call
    /// and its result is returned as-is; a query failure from the chosen
    /// driver is not retried against later drivers.
    pub fn create_tile(
        &self,
        min_corner: &GroundPosition,
        size: RasterSize,
        gsd_m: f64,
    ) -> Result<ElevationTile> {
        let max_corner = min_corner.offset(size.width as f64 * gsd_m, size.height as f64 * gsd_m);

        for driver in &self.drivers {
            if driver.covers_region(min_corner, &max_corner) {
                debug!(driver = driver.name(), "delegating tile creation");
                return driver.create_tile(min_corner, size, gsd_m);
            }
        }
        Err(DemError::NoTerrainCoverage)
    }
}
