//! Geodetic datum identifiers.

use std::fmt;

/// The reference ellipsoid/frame a coordinate's numeric values are expressed
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Datum {
    /// World Geodetic System 1984.
    #[default]
    Wgs84,
    /// North American Datum 1983.
    Nad83,
    /// Unknown or unspecified reference frame.
    Unknown,
}

impl Datum {
    /// Whether UTM conversion parameters exist for this datum.
    ///
    /// NAD83 uses the GRS80 ellipsoid, which is identical to WGS84 at the
    /// precision of the conversion series used here.
    pub fn supports_utm(&self) -> bool {
        !matches!(self, Datum::Unknown)
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Wgs84 => write!(f, "WGS84"),
            Datum::Nad83 => write!(f, "NAD83"),
            Datum::Unknown => write!(f, "unknown"),
        }
    }
}
