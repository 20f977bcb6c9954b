//! SRTM-style archive driver backed by geo-tagged raster files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use relief_geo::{
    utm_to_geographic_batch, GeographicCoordinate, GroundPosition, PlanarPosition, Rect,
};
use tracing::{debug, info, warn};

use crate::reader::{is_supported_source, reader_for};
use crate::{DemError, ElevationSource, ElevationTile, Raster, RasterSize, Result};

/// Tolerance for the area comparison in the region-coverage test, in the
/// extent's planar units squared.
const COVERAGE_AREA_EPS: f64 = 1e-9;

/// Lifecycle of an archive driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    /// Constructed, not yet scanned.
    Uninitialized,
    /// Scan in progress.
    Initializing,
    /// At least one valid source file indexed.
    Ready,
    /// Initialization found no usable sources.
    Failed,
}

/// One backing file: its extent, known from initialization, and its pixel
/// grid, loaded at most once on first query.
#[derive(Debug)]
struct SourceRecord {
    path: PathBuf,
    extent: Rect<GeographicCoordinate>,
    raster: OnceLock<Raster>,
}

impl SourceRecord {
    fn new(path: PathBuf, extent: Rect<GeographicCoordinate>) -> Self {
        Self {
            path,
            extent,
            raster: OnceLock::new(),
        }
    }
}

/// A driver backed by one or more pre-tiled raster files with known
/// individual extents (SRTM `.hgt` cells, USGS GeoTIFF tiles).
///
/// Construction just records the configured paths; [`initialize`] scans
/// them, validating each candidate file through its reader and recording
/// its extent. Pixel grids load lazily on first query and stay resident for
/// the driver's lifetime.
///
/// [`initialize`]: ArchiveSource::initialize
#[derive(Debug)]
pub struct ArchiveSource {
    paths: Vec<PathBuf>,
    records: Vec<SourceRecord>,
    state: SourceState,
}

impl ArchiveSource {
    /// Create a driver over the given files and/or directories.
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
            records: Vec::new(),
            state: SourceState::Uninitialized,
        }
    }

    /// Scan the configured paths and index every valid source file.
    ///
    /// Directories are enumerated non-recursively; entries with a supported
    /// extension are validated through their reader and invalid ones are
    /// skipped with a warning. The driver ends up `Ready` if at least one
    /// valid source was found, `Failed` otherwise.
    pub fn initialize(&mut self) -> Result<()> {
        self.state = SourceState::Initializing;
        let mut records = Vec::new();

        for path in &self.paths {
            if path.is_dir() {
                let mut entries: Vec<PathBuf> = fs::read_dir(path)?
                    .filter_map(|entry| entry.ok().map(|e| e.path()))
                    .filter(|p| p.is_file() && is_supported_source(p))
                    .collect();
                // Deterministic record order so first-match queries do not
                // depend on directory iteration order.
                entries.sort();
                for entry in entries {
                    Self::index_file(&mut records, &entry);
                }
            } else if path.is_file() {
                if is_supported_source(path) {
                    Self::index_file(&mut records, path);
                } else {
                    warn!(path = %path.display(), "skipping source with unsupported format");
                }
            } else {
                self.state = SourceState::Failed;
                return Err(DemError::PathDoesNotExist(path.clone()));
            }
        }

        if records.is_empty() {
            self.state = SourceState::Failed;
            return Err(DemError::NoValidSources);
        }

        info!(sources = records.len(), "archive driver ready");
        self.records = records;
        self.state = SourceState::Ready;
        Ok(())
    }

    fn index_file(records: &mut Vec<SourceRecord>, path: &Path) {
        let extent = reader_for(path).and_then(|reader| reader.read_extent(path));
        match extent {
            Ok(extent) => records.push(SourceRecord::new(path.to_path_buf(), extent)),
            Err(err) => warn!(path = %path.display(), %err, "skipping invalid source file"),
        }
    }

    /// The driver's lifecycle state.
    pub fn state(&self) -> SourceState {
        self.state
    }

    /// Number of indexed source files.
    pub fn source_count(&self) -> usize {
        self.records.len()
    }

    /// The raster for a record, loading it on first access.
    fn raster_for<'a>(&'a self, record: &'a SourceRecord) -> Result<&'a Raster> {
        if let Some(raster) = record.raster.get() {
            return Ok(raster);
        }
        debug!(path = %record.path.display(), "loading elevation raster");
        let loaded = reader_for(&record.path)?.read_raster(&record.path)?;
        // If a concurrent query won the race, ours is dropped; the slot is
        // only ever populated once.
        Ok(record.raster.get_or_init(|| loaded))
    }

    fn record_containing(&self, point: &GeographicCoordinate) -> Option<&SourceRecord> {
        self.records.iter().find(|r| r.extent.contains(point))
    }
}

impl ElevationSource for ArchiveSource {
    fn name(&self) -> &str {
        "archive"
    }

    fn is_ready(&self) -> bool {
        self.state == SourceState::Ready
    }

    fn covers_point(&self, point: &GeographicCoordinate) -> bool {
        self.record_containing(point).is_some()
    }

    /// A region is covered only when it fits entirely inside a single
    /// source extent: a request straddling two adjacent cells reports no
    /// coverage even though each half is individually coverable.
    fn covers_region(&self, min: &GroundPosition, max: &GroundPosition) -> bool {
        let (min_geo, max_geo) = match (min.to_geographic(), max.to_geographic()) {
            (Ok(min_geo), Ok(max_geo)) => (min_geo, max_geo),
            _ => return false,
        };
        let bbox = Rect::from_corners(min_geo, max_geo);

        self.records.iter().any(|record| {
            let overlap = record.extent.intersection(&bbox);
            overlap.area() > 0.0
                && (overlap.union(&bbox).area() - overlap.area()).abs() < COVERAGE_AREA_EPS
        })
    }

    fn create_tile(
        &self,
        min_corner: &GroundPosition,
        size: RasterSize,
        gsd_m: f64,
    ) -> Result<ElevationTile> {
        if self.state != SourceState::Ready {
            return Err(DemError::Uninitialized);
        }
        let utm_corner = match min_corner {
            GroundPosition::Utm(corner) => *corner,
            GroundPosition::Geographic(_) => {
                return Err(DemError::NotImplemented(
                    "archive tile creation from a geographic corner",
                ))
            }
        };

        // One planar position per output pixel, row 0 at the bottom-left
        // anchor, converted to geographic in a single batch.
        let mut positions = Vec::with_capacity(size.width * size.height);
        for row in 0..size.height {
            for col in 0..size.width {
                positions.push(utm_corner.offset(col as f64 * gsd_m, row as f64 * gsd_m));
            }
        }
        let points = utm_to_geographic_batch(&positions)?;

        let mut raster = Raster::filled(size.height, size.width, 0.0);
        for (i, point) in points.iter().enumerate() {
            let elevation = self.query_elevation(point)?;
            raster.set(i / size.width, i % size.width, elevation as f32);
        }
        Ok(ElevationTile::new(raster, gsd_m, *min_corner))
    }

    fn query_elevation(&self, point: &GeographicCoordinate) -> Result<f64> {
        if self.state != SourceState::Ready {
            return Err(DemError::Uninitialized);
        }
        let record = self
            .record_containing(point)
            .ok_or_else(|| DemError::NoCoverage {
                lat: point.latitude(),
                lon: point.longitude(),
            })?;
        let raster = self.raster_for(record)?;
        let extent = &record.extent;

        // Linear map into fractional pixels; row 0 is the northern row.
        let px =
            raster.cols() as f64 * (point.longitude() - extent.min().x()) / extent.width();
        let py = raster.rows() as f64 * (extent.min().y() + extent.height() - point.latitude())
            / extent.height();

        if px < 0.0 || px >= raster.cols() as f64 || py < 0.0 || py >= raster.rows() as f64 {
            return Err(DemError::OutOfBounds {
                x: px,
                y: py,
                cols: raster.cols(),
                rows: raster.rows(),
            });
        }

        let value = raster.sample(px, py);
        if raster.is_nodata(value) {
            return Err(DemError::NoData {
                lat: point.latitude(),
                lon: point.longitude(),
            });
        }
        Ok(value as f64)
    }
}
