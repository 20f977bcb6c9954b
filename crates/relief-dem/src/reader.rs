//! Raster readers for archive source files.
//!
//! Readers implement the decoding boundary the drivers sit behind: one call
//! to learn a file's geographic extent at initialization time, one to load
//! its pixel grid on first query. Dispatch is by file extension.

use std::fs::File;
use std::path::Path;

use relief_geo::{Datum, GeographicCoordinate, Rect};
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;

use crate::{DemError, Raster, Result};

const TAG_MODEL_PIXEL_SCALE: u16 = 33550;
const TAG_MODEL_TIEPOINT: u16 = 33922;
const TAG_GDAL_NODATA: u16 = 42113;

/// SRTM void marker.
const HGT_VOID: f32 = -32768.0;

/// Decodes the extent and pixel grid of one archive file format.
pub trait RasterReader: Send + Sync {
    /// The geographic extent the file covers. Cheap; used to index sources
    /// without loading pixel data.
    fn read_extent(&self, path: &Path) -> Result<Rect<GeographicCoordinate>>;

    /// The file's full pixel grid.
    fn read_raster(&self, path: &Path) -> Result<Raster>;
}

/// Whether a file extension has a reader.
pub fn is_supported_source(path: &Path) -> bool {
    reader_for(path).is_ok()
}

/// Select the reader for a file by its extension.
pub fn reader_for(path: &Path) -> Result<&'static dyn RasterReader> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("tif") | Some("tiff") => Ok(&GeoTiffReader),
        Some("hgt") => Ok(&HgtReader),
        _ => Err(DemError::UnsupportedArchiveFormat(path.to_path_buf())),
    }
}

/// Find an `n48w123` / `S34E151`-style cell label in a filename and return
/// its signed (latitude, longitude) degrees.
fn parse_cell_label(name: &str) -> Option<(f64, f64)> {
    let bytes = name.as_bytes();
    for i in 0..bytes.len() {
        let c = bytes[i].to_ascii_lowercase();
        if c != b'n' && c != b's' {
            continue;
        }
        let south = c == b's';

        let mut j = i + 1;
        let mut lat = 0i32;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            lat = lat * 10 + (bytes[j] - b'0') as i32;
            j += 1;
        }
        if j == i + 1 || j >= bytes.len() {
            continue;
        }

        let d = bytes[j].to_ascii_lowercase();
        if d != b'e' && d != b'w' {
            continue;
        }
        let west = d == b'w';

        let mut k = j + 1;
        let mut lon = 0i32;
        while k < bytes.len() && bytes[k].is_ascii_digit() {
            lon = lon * 10 + (bytes[k] - b'0') as i32;
            k += 1;
        }
        if k == j + 1 {
            continue;
        }

        let lat = if south { -lat } else { lat };
        let lon = if west { -lon } else { lon };
        return Some((lat as f64, lon as f64));
    }
    None
}

fn filename_of(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| DemError::InvalidFilename(path.display().to_string()))
}

/// GeoTIFF reader (USGS 3DEP-style tiles and similar).
///
/// Extent comes from the ModelTiepoint/ModelPixelScale tags, falling back to
/// the USGS filename convention where the cell label names the northwest
/// corner of a 1°x1° tile.
#[derive(Debug)]
pub struct GeoTiffReader;

impl GeoTiffReader {
    fn open_decoder(path: &Path) -> Result<Decoder<File>> {
        let file = File::open(path)?;
        let decoder = Decoder::new(file)?;

        // Allow large tiles; 1/3 arc-second cells run to ~466 MB of f32.
        let mut limits = Limits::default();
        limits.decoding_buffer_size = 1024 * 1024 * 1024;
        limits.intermediate_buffer_size = 1024 * 1024 * 1024;
        limits.ifd_value_size = 1024 * 1024 * 1024;
        Ok(decoder.with_limits(limits))
    }

    fn extent_from_tags(decoder: &mut Decoder<File>) -> Result<Option<Rect<GeographicCoordinate>>> {
        let tiepoint = decoder.get_tag_f64_vec(Tag::Unknown(TAG_MODEL_TIEPOINT));
        let scale = decoder.get_tag_f64_vec(Tag::Unknown(TAG_MODEL_PIXEL_SCALE));

        if let (Ok(tiepoint), Ok(scale)) = (tiepoint, scale) {
            if tiepoint.len() >= 6 && scale.len() >= 2 {
                // Tiepoint is [i, j, k, x, y, z]: pixel (i,j) sits at geo (x,y),
                // conventionally the top-left corner.
                let (width, height) = decoder.dimensions()?;
                let max_lat = tiepoint[4];
                let min_lon = tiepoint[3];
                let width_deg = width as f64 * scale[0];
                let height_deg = height as f64 * scale[1];
                let min =
                    GeographicCoordinate::new(max_lat - height_deg, min_lon, 0.0, Datum::Wgs84)?;
                return Ok(Some(Rect::new(min, width_deg, height_deg)));
            }
        }
        Ok(None)
    }

    fn extent_from_filename(path: &Path) -> Result<Rect<GeographicCoordinate>> {
        let name = filename_of(path)?;
        let (nw_lat, nw_lon) = parse_cell_label(name)
            .ok_or_else(|| DemError::InvalidFilename(name.to_string()))?;
        let min = GeographicCoordinate::new(nw_lat - 1.0, nw_lon, 0.0, Datum::Wgs84)?;
        Ok(Rect::new(min, 1.0, 1.0))
    }

    fn read_nodata(decoder: &mut Decoder<File>) -> Option<f32> {
        // GDAL_NODATA is stored as an ASCII string.
        if let Ok(text) = decoder.get_tag_ascii_string(Tag::Unknown(TAG_GDAL_NODATA)) {
            text.trim_end_matches('\0').trim().parse().ok()
        } else {
            // Common default for USGS DEMs.
            Some(-999_999.0)
        }
    }
}

impl RasterReader for GeoTiffReader {
    fn read_extent(&self, path: &Path) -> Result<Rect<GeographicCoordinate>> {
        let mut decoder = Self::open_decoder(path)?;
        match Self::extent_from_tags(&mut decoder)? {
            Some(extent) => Ok(extent),
            None => Self::extent_from_filename(path),
        }
    }

    fn read_raster(&self, path: &Path) -> Result<Raster> {
        let mut decoder = Self::open_decoder(path)?;
        let (width, height) = decoder.dimensions()?;

        let data = match decoder.read_image()? {
            DecodingResult::F32(data) => data,
            DecodingResult::F64(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::I16(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::I32(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::U16(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::U32(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::U8(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::I8(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::U64(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::I64(data) => data.into_iter().map(|v| v as f32).collect(),
        };

        let nodata = Self::read_nodata(&mut decoder);
        Ok(Raster::from_data(height as usize, width as usize, data)?.with_nodata(nodata))
    }
}

/// SRTM `.hgt` reader.
///
/// Raw big-endian 16-bit grid with no header; the side length falls out of
/// the file size (3601 for 1 arc-second, 1201 for 3 arc-second cells). The
/// cell label in the filename names the *southwest* corner of a 1°x1° tile,
/// unlike the USGS GeoTIFF convention.
#[derive(Debug)]
pub struct HgtReader;

impl RasterReader for HgtReader {
    fn read_extent(&self, path: &Path) -> Result<Rect<GeographicCoordinate>> {
        let name = filename_of(path)?;
        let (sw_lat, sw_lon) = parse_cell_label(name)
            .ok_or_else(|| DemError::InvalidFilename(name.to_string()))?;
        let min = GeographicCoordinate::new(sw_lat, sw_lon, 0.0, Datum::Wgs84)?;
        Ok(Rect::new(min, 1.0, 1.0))
    }

    fn read_raster(&self, path: &Path) -> Result<Raster> {
        let bytes = std::fs::read(path)?;
        let samples = bytes.len() / 2;
        let side = (samples as f64).sqrt().round() as usize;
        if side == 0 || side * side * 2 != bytes.len() {
            return Err(DemError::InvalidHgt {
                path: path.to_path_buf(),
                reason: format!("{} bytes is not a square 16-bit grid", bytes.len()),
            });
        }

        let data = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_be_bytes([pair[0], pair[1]]) as f32)
            .collect();
        Ok(Raster::from_data(side, side, data)?.with_nodata(Some(HGT_VOID)))
    }
}
