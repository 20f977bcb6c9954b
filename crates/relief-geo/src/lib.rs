//! # relief-geo
//!
//! Coordinate model and planar extent geometry for the relief terrain stack.
//!
//! This crate provides:
//! - Geographic (latitude/longitude) and projected (UTM) coordinate value
//!   types, each carrying an altitude and a [`Datum`]
//! - [`Rect`], an axis-aligned rectangle over any planar coordinate type,
//!   used for source-extent and coverage reasoning
//! - WGS84 geographic ↔ UTM conversion (Krueger series), including a batched
//!   UTM → geographic variant for per-pixel tile workloads
//!
//! ## Example
//!
//! ```
//! use relief_geo::{geographic_to_utm, utm_to_geographic, Datum, GeographicCoordinate};
//!
//! let seattle = GeographicCoordinate::new(47.6062, -122.3321, 0.0, Datum::Wgs84)?;
//! let utm = geographic_to_utm(&seattle)?;
//! assert_eq!(utm.zone(), 10);
//!
//! let back = utm_to_geographic(&utm)?;
//! assert!((back.latitude() - seattle.latitude()).abs() < 1e-6);
//! # Ok::<(), relief_geo::GeoError>(())
//! ```

mod coord;
mod datum;
mod error;
mod rect;
mod utm;

pub use coord::{GeographicCoordinate, GroundPosition, PlanarPosition, UtmCoordinate};
pub use datum::Datum;
pub use error::GeoError;
pub use rect::Rect;
pub use utm::{
    geographic_to_utm, geographic_to_utm_zone, utm_to_geographic, utm_to_geographic_batch,
    utm_zone_for,
};

/// Result type for coordinate operations.
pub type Result<T> = std::result::Result<T, GeoError>;
