//! Integration tests against synthetic SRTM archives.
//!
//! Each test builds tiny `.hgt` cells in a tempdir: raw big-endian i16
//! grids whose side length the reader derives from the file size.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use approx::assert_relative_eq;
use relief_dem::{
    build_drivers, ArchiveSource, DemError, DriverConfig, ElevationManager, ElevationSource,
    FlatSource, RasterSize,
};
use relief_geo::{geographic_to_utm, Datum, GeographicCoordinate, GroundPosition};
use tempfile::TempDir;

/// Grid side of the synthetic cells; pixel mapping divides each 1° cell
/// into `SIDE` steps.
const SIDE: usize = 4;

fn write_hgt(dir: &Path, name: &str, value: impl Fn(usize, usize) -> i16) {
    let mut bytes = Vec::with_capacity(SIDE * SIDE * 2);
    for row in 0..SIDE {
        for col in 0..SIDE {
            bytes.extend_from_slice(&value(row, col).to_be_bytes());
        }
    }
    fs::write(dir.join(name), bytes).unwrap();
}

/// Row 0 is the northern row; value = row * 100 + col * 10.
fn ramp(row: usize, col: usize) -> i16 {
    (row * 100 + col * 10) as i16
}

fn geo(lat: f64, lon: f64) -> GeographicCoordinate {
    GeographicCoordinate::new(lat, lon, 0.0, Datum::Wgs84).unwrap()
}

/// Two adjacent cells covering 47..48°N, 123..121°W, plus noise files the
/// scan must ignore.
fn archive_fixture() -> (TempDir, ArchiveSource) {
    let dir = tempfile::tempdir().unwrap();
    write_hgt(dir.path(), "N47W123.hgt", ramp);
    write_hgt(dir.path(), "N47W122.hgt", ramp);
    write_hgt(dir.path(), "tile_0001.hgt", ramp); // no cell label
    fs::write(dir.path().join("readme.txt"), b"not a tile").unwrap();

    let mut source = ArchiveSource::new([dir.path().to_path_buf()]);
    source.initialize().unwrap();
    (dir, source)
}

#[test]
fn initialize_indexes_valid_sources_only() {
    let (_dir, source) = archive_fixture();
    assert!(source.is_ready());
    assert_eq!(source.source_count(), 2);
}

#[test]
fn empty_directory_fails_initialization() {
    let dir = tempfile::tempdir().unwrap();
    let mut source = ArchiveSource::new([dir.path().to_path_buf()]);
    assert!(matches!(source.initialize(), Err(DemError::NoValidSources)));
    assert!(!source.is_ready());
}

#[test]
fn point_coverage_follows_extents() {
    let (_dir, source) = archive_fixture();
    assert!(source.covers_point(&geo(47.5, -122.5)));
    assert!(source.covers_point(&geo(47.5, -121.5)));
    // 2 degrees outside every cell.
    assert!(!source.covers_point(&geo(45.5, -122.5)));
    assert!(!source.covers_point(&geo(47.5, -119.5)));
}

#[test]
fn query_on_grid_node_returns_stored_value() {
    let (_dir, source) = archive_fixture();
    // px = 4 * (lon + 123) = 2, py = 4 * (48 - lat) = 1 -> node (1, 2).
    let elevation = source.query_elevation(&geo(47.75, -122.5)).unwrap();
    assert_eq!(elevation, 120.0);
}

#[test]
fn query_between_nodes_returns_mean() {
    let (_dir, source) = archive_fixture();
    // px = 1.5, py = 1.0: exactly between nodes (1,1)=110 and (1,2)=120.
    let elevation = source.query_elevation(&geo(47.75, -122.625)).unwrap();
    assert_relative_eq!(elevation, 115.0, epsilon = 1e-3);
}

#[test]
fn query_outside_coverage_fails() {
    let (_dir, source) = archive_fixture();
    assert!(matches!(
        source.query_elevation(&geo(45.5, -122.5)),
        Err(DemError::NoCoverage { .. })
    ));
}

#[test]
fn south_edge_maps_out_of_bounds() {
    let (_dir, source) = archive_fixture();
    // The extent contains its southern edge, but the pixel mapping lands on
    // py == rows, outside [0, rows).
    assert!(matches!(
        source.query_elevation(&geo(47.0, -122.5)),
        Err(DemError::OutOfBounds { .. })
    ));
}

#[test]
fn region_straddling_two_cells_is_not_covered() {
    let (_dir, source) = archive_fixture();
    let min = GroundPosition::Geographic(geo(47.2, -122.5));
    let max = GroundPosition::Geographic(geo(47.8, -121.5));
    assert!(!source.covers_region(&min, &max));

    // Each half on its own is fine.
    let min = GroundPosition::Geographic(geo(47.2, -122.5));
    let max = GroundPosition::Geographic(geo(47.8, -122.1));
    assert!(source.covers_region(&min, &max));
}

#[test]
fn void_samples_surface_as_no_data() {
    let dir = tempfile::tempdir().unwrap();
    write_hgt(dir.path(), "N47W123.hgt", |row, col| {
        if row == 1 && col == 2 {
            -32768
        } else {
            100
        }
    });
    let mut source = ArchiveSource::new([dir.path().to_path_buf()]);
    source.initialize().unwrap();

    assert!(matches!(
        source.query_elevation(&geo(47.75, -122.5)),
        Err(DemError::NoData { .. })
    ));
}

#[test]
fn rasters_load_lazily_and_stay_cached() {
    let dir = tempfile::tempdir().unwrap();
    write_hgt(dir.path(), "N47W123.hgt", ramp);
    let mut source = ArchiveSource::new([dir.path().join("N47W123.hgt")]);
    source.initialize().unwrap();

    // First query populates the cache slot.
    assert_eq!(source.query_elevation(&geo(47.75, -122.5)).unwrap(), 120.0);

    // The backing file is no longer needed once cached.
    fs::remove_file(dir.path().join("N47W123.hgt")).unwrap();
    assert_eq!(source.query_elevation(&geo(47.75, -122.5)).unwrap(), 120.0);
}

#[test]
fn utm_tile_is_cut_from_archive_samples() {
    let (_dir, source) = archive_fixture();
    let mut manager = ElevationManager::new();
    manager.add_driver(Arc::new(source));
    manager.add_driver(Arc::new(FlatSource::new(-1.0)));

    // A ~120 m square well inside the N47W123 cell.
    let corner_utm = geographic_to_utm(&geo(47.4, -122.7)).unwrap();
    let corner = GroundPosition::Utm(corner_utm);
    let tile = manager
        .create_tile(&corner, RasterSize::new(4, 4), 30.0)
        .unwrap();

    assert_eq!(tile.cols(), 4);
    assert_eq!(tile.rows(), 4);
    for row in 0..tile.rows() {
        for col in 0..tile.cols() {
            let v = tile.get(row, col);
            // Blends of the synthetic ramp, never the flat fallback.
            assert!((0.0..=330.0).contains(&v), "sample {v} at ({row}, {col})");
        }
    }
}

#[test]
fn uncovered_region_falls_through_to_flat_driver() {
    let (_dir, source) = archive_fixture();
    let mut manager = ElevationManager::new();
    manager.add_driver(Arc::new(source));
    manager.add_driver(Arc::new(FlatSource::new(-1.0)));

    let corner = GroundPosition::Geographic(geo(10.0, 10.0));
    let tile = manager
        .create_tile(&corner, RasterSize::new(8, 8), 30.0)
        .unwrap();
    assert!(tile.raster().data().iter().all(|&v| v == -1.0));
}

#[test]
fn config_builds_ordered_ready_drivers() {
    let dir = tempfile::tempdir().unwrap();
    write_hgt(dir.path(), "N47W123.hgt", ramp);
    let config_path = dir.path().join("relief.yaml");
    fs::write(
        &config_path,
        format!(
            "drivers:\n  - type: archive\n    paths: [{}]\n  - type: flat\n    elevation: 5.0\n",
            dir.path().display()
        ),
    )
    .unwrap();

    let config = DriverConfig::load(&config_path).unwrap();
    let drivers = build_drivers(&config);
    assert_eq!(drivers.len(), 2);
    assert_eq!(drivers[0].name(), "archive");
    assert_eq!(drivers[1].name(), "flat");

    let mut manager = ElevationManager::new();
    manager.add_drivers(drivers);
    assert_eq!(manager.driver_count(), 2);
}
