//! Error types for coordinate handling and conversion.

use crate::Datum;
use thiserror::Error;

/// Errors that can occur when constructing or converting coordinates.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Latitude outside the representable range.
    #[error("latitude {0} is outside [-90, 90] degrees")]
    LatitudeOutOfRange(f64),

    /// Longitude outside the representable range.
    #[error("longitude {0} is outside [-180, 180] degrees")]
    LongitudeOutOfRange(f64),

    /// UTM zone outside 1..=60.
    #[error("UTM zone {0} is outside 1..=60")]
    ZoneOutOfRange(u8),

    /// No conversion parameters for the coordinate's datum.
    #[error("datum {0} is not supported for UTM conversion")]
    UnsupportedDatum(Datum),

    /// Latitude outside the domain of the transverse Mercator projection.
    #[error("latitude {0} is outside the UTM domain [-80, 84] degrees")]
    OutsideUtmDomain(f64),
}
