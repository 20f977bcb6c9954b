//! Geographic and projected coordinate value types.

use std::fmt;
use std::ops::{Add, Sub};

use crate::{Datum, GeoError, Result};

/// A planar position with x/y axes that rectangles and offsets operate on.
///
/// For geographic coordinates the planar axes are (longitude, latitude) in
/// degrees; for UTM coordinates they are (easting, northing) in meters.
pub trait PlanarPosition: Copy {
    /// Position along the horizontal axis.
    fn x(&self) -> f64;
    /// Position along the vertical axis.
    fn y(&self) -> f64;
    /// The position displaced by `(dx, dy)` along the planar axes.
    ///
    /// Offsets are applied raw; range validation happens only at
    /// construction time.
    fn offset(&self, dx: f64, dy: f64) -> Self;
}

/// A geographic coordinate: latitude/longitude in degrees plus altitude in
/// meters, expressed against a [`Datum`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeographicCoordinate {
    latitude_deg: f64,
    longitude_deg: f64,
    altitude_m: f64,
    datum: Datum,
}

impl GeographicCoordinate {
    /// Create a coordinate, validating latitude ∈ [-90, 90] and
    /// longitude ∈ [-180, 180].
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64, datum: Datum) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(GeoError::LatitudeOutOfRange(latitude_deg));
        }
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(GeoError::LongitudeOutOfRange(longitude_deg));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
            datum,
        })
    }

    /// Latitude in decimal degrees (positive = north).
    pub fn latitude(&self) -> f64 {
        self.latitude_deg
    }

    /// Longitude in decimal degrees (positive = east).
    pub fn longitude(&self) -> f64 {
        self.longitude_deg
    }

    /// Altitude in meters above the ellipsoid.
    pub fn altitude(&self) -> f64 {
        self.altitude_m
    }

    /// The datum the numeric values are expressed against.
    pub fn datum(&self) -> Datum {
        self.datum
    }
}

impl PlanarPosition for GeographicCoordinate {
    fn x(&self) -> f64 {
        self.longitude_deg
    }

    fn y(&self) -> f64 {
        self.latitude_deg
    }

    fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            latitude_deg: self.latitude_deg + dy,
            longitude_deg: self.longitude_deg + dx,
            altitude_m: self.altitude_m,
            datum: self.datum,
        }
    }
}

impl fmt::Display for GeographicCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.6}°, {:.6}°, {:.1} m, {})",
            self.latitude_deg, self.longitude_deg, self.altitude_m, self.datum
        )
    }
}

/// A projected UTM coordinate: zone, hemisphere, easting/northing in meters,
/// altitude in meters, expressed against a [`Datum`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmCoordinate {
    zone: u8,
    northern: bool,
    easting_m: f64,
    northing_m: f64,
    altitude_m: f64,
    datum: Datum,
}

impl UtmCoordinate {
    /// Create a coordinate, validating zone ∈ 1..=60.
    pub fn new(
        zone: u8,
        northern: bool,
        easting_m: f64,
        northing_m: f64,
        altitude_m: f64,
        datum: Datum,
    ) -> Result<Self> {
        if !(1..=60).contains(&zone) {
            return Err(GeoError::ZoneOutOfRange(zone));
        }
        Ok(Self {
            zone,
            northern,
            easting_m,
            northing_m,
            altitude_m,
            datum,
        })
    }

    /// UTM zone number (1..=60).
    pub fn zone(&self) -> u8 {
        self.zone
    }

    /// True for the northern hemisphere.
    pub fn is_northern(&self) -> bool {
        self.northern
    }

    /// Easting in meters.
    pub fn easting(&self) -> f64 {
        self.easting_m
    }

    /// Northing in meters.
    pub fn northing(&self) -> f64 {
        self.northing_m
    }

    /// Altitude in meters above the ellipsoid.
    pub fn altitude(&self) -> f64 {
        self.altitude_m
    }

    /// The datum the numeric values are expressed against.
    pub fn datum(&self) -> Datum {
        self.datum
    }
}

impl PlanarPosition for UtmCoordinate {
    fn x(&self) -> f64 {
        self.easting_m
    }

    fn y(&self) -> f64 {
        self.northing_m
    }

    fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            easting_m: self.easting_m + dx,
            northing_m: self.northing_m + dy,
            ..*self
        }
    }
}

/// Component-wise arithmetic on easting/northing/altitude.
///
/// Only meaningful when both operands share zone and hemisphere; mixing
/// them is a caller error.
impl Add for UtmCoordinate {
    type Output = UtmCoordinate;

    fn add(self, rhs: UtmCoordinate) -> UtmCoordinate {
        debug_assert_eq!(self.zone, rhs.zone, "UTM addition across zones");
        debug_assert_eq!(self.northern, rhs.northern, "UTM addition across hemispheres");
        Self {
            easting_m: self.easting_m + rhs.easting_m,
            northing_m: self.northing_m + rhs.northing_m,
            altitude_m: self.altitude_m + rhs.altitude_m,
            ..self
        }
    }
}

impl Sub for UtmCoordinate {
    type Output = UtmCoordinate;

    fn sub(self, rhs: UtmCoordinate) -> UtmCoordinate {
        debug_assert_eq!(self.zone, rhs.zone, "UTM subtraction across zones");
        debug_assert_eq!(self.northern, rhs.northern, "UTM subtraction across hemispheres");
        Self {
            easting_m: self.easting_m - rhs.easting_m,
            northing_m: self.northing_m - rhs.northing_m,
            altitude_m: self.altitude_m - rhs.altitude_m,
            ..self
        }
    }
}

impl fmt::Display for UtmCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}{} {:.1} E, {:.1} N, {:.1} m, {})",
            self.zone,
            if self.northern { 'N' } else { 'S' },
            self.easting_m,
            self.northing_m,
            self.altitude_m,
            self.datum
        )
    }
}

/// A position in one of the supported coordinate representations.
///
/// Closed union over the coordinate kinds the elevation stack dispatches on,
/// in place of per-type interface overloads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroundPosition {
    /// Latitude/longitude degrees.
    Geographic(GeographicCoordinate),
    /// Projected UTM meters.
    Utm(UtmCoordinate),
}

impl GroundPosition {
    /// Displace the position by `(dx, dy)` along the planar axes of its
    /// representation (degrees for geographic, meters for UTM).
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        match self {
            GroundPosition::Geographic(c) => GroundPosition::Geographic(c.offset(dx, dy)),
            GroundPosition::Utm(c) => GroundPosition::Utm(c.offset(dx, dy)),
        }
    }

    /// The position in geographic representation, converting from UTM if
    /// necessary.
    pub fn to_geographic(&self) -> Result<GeographicCoordinate> {
        match self {
            GroundPosition::Geographic(c) => Ok(*c),
            GroundPosition::Utm(c) => crate::utm_to_geographic(c),
        }
    }
}

impl From<GeographicCoordinate> for GroundPosition {
    fn from(c: GeographicCoordinate) -> Self {
        GroundPosition::Geographic(c)
    }
}

impl From<UtmCoordinate> for GroundPosition {
    fn from(c: UtmCoordinate) -> Self {
        GroundPosition::Utm(c)
    }
}

impl fmt::Display for GroundPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroundPosition::Geographic(c) => c.fmt(f),
            GroundPosition::Utm(c) => c.fmt(f),
        }
    }
}
