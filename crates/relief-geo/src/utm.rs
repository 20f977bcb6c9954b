//! Geographic ↔ UTM conversion.
//!
//! Krueger-series approximation of the transverse Mercator projection on the
//! WGS84 ellipsoid (see
//! <https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system>).
//! Accurate to well under a meter inside a zone, which is far below the
//! ground-sample distances this stack works at.

use crate::{Datum, GeoError, GeographicCoordinate, Result, UtmCoordinate};

// Series constants for the WGS84 ellipsoid (a = 6378.137 km,
// f = 1/298.257223563, n = f / (2 - f)).
const ALPHA1: f64 = 8.377318188192541e-4;
const ALPHA2: f64 = 7.608496958699166e-7;
const ALPHA3: f64 = 1.2034877875966646e-9;
const BETA1: f64 = 8.37732164082144e-4;
const BETA2: f64 = 5.906110863719917e-8;
const BETA3: f64 = 1.6769911794379754e-10;
const DELTA1: f64 = 3.356551448628875e-3;
const DELTA2: f64 = 6.571913193172695e-6;
const DELTA3: f64 = 1.76774599620756e-8;

/// First eccentricity, `2 sqrt(n) / (1 + n)`.
const ECC: f64 = 0.08181919084262149;
/// `k0 * A` in kilometers, with A the rectifying radius.
const K0_A_KM: f64 = 6364.902166165087;
/// False easting in kilometers.
const E0_KM: f64 = 500.0;
/// False northing for the southern hemisphere in kilometers.
const N0_SOUTH_KM: f64 = 10_000.0;

fn check_datum(datum: Datum) -> Result<()> {
    if datum.supports_utm() {
        Ok(())
    } else {
        Err(GeoError::UnsupportedDatum(datum))
    }
}

fn central_meridian_rad(zone: u8) -> f64 {
    (zone as f64 * 6.0 - 183.0).to_radians()
}

/// The UTM zone a longitude falls in, by the regular 6° graticule.
///
/// The Norway/Svalbard zone exceptions are deliberately not applied; sources
/// in those regions can force a zone with [`geographic_to_utm_zone`].
pub fn utm_zone_for(point: &GeographicCoordinate) -> u8 {
    ((((point.longitude() + 180.0) / 6.0).trunc() as u32 % 60) + 1) as u8
}

/// Convert a geographic coordinate to UTM in the zone its longitude falls in.
pub fn geographic_to_utm(point: &GeographicCoordinate) -> Result<UtmCoordinate> {
    geographic_to_utm_zone(point, utm_zone_for(point))
}

/// Convert a geographic coordinate to UTM in a caller-chosen zone.
pub fn geographic_to_utm_zone(point: &GeographicCoordinate, zone: u8) -> Result<UtmCoordinate> {
    check_datum(point.datum())?;

    let lat = point.latitude();
    if !(-80.0..=84.0).contains(&lat) {
        return Err(GeoError::OutsideUtmDomain(lat));
    }
    let northern = lat >= 0.0;

    let phi = lat.to_radians();
    let d_lambda = point.longitude().to_radians() - central_meridian_rad(zone);
    let n0_km = if northern { 0.0 } else { N0_SOUTH_KM };

    let sin_phi = phi.sin();
    let t = (sin_phi.atanh() - ECC * (ECC * sin_phi).atanh()).sinh();
    let xi = (t / d_lambda.cos()).atan();
    let eta = (d_lambda.sin() / (1.0 + t * t).sqrt()).atanh();

    let easting_km = E0_KM
        + K0_A_KM
            * (eta
                + ALPHA1 * (2.0 * xi).cos() * (2.0 * eta).sinh()
                + ALPHA2 * (4.0 * xi).cos() * (4.0 * eta).sinh()
                + ALPHA3 * (6.0 * xi).cos() * (6.0 * eta).sinh());
    let northing_km = n0_km
        + K0_A_KM
            * (xi
                + ALPHA1 * (2.0 * xi).sin() * (2.0 * eta).cosh()
                + ALPHA2 * (4.0 * xi).sin() * (4.0 * eta).cosh()
                + ALPHA3 * (6.0 * xi).sin() * (6.0 * eta).cosh());

    UtmCoordinate::new(
        zone,
        northern,
        easting_km * 1000.0,
        northing_km * 1000.0,
        point.altitude(),
        point.datum(),
    )
}

/// Convert a UTM coordinate back to geographic.
pub fn utm_to_geographic(utm: &UtmCoordinate) -> Result<GeographicCoordinate> {
    check_datum(utm.datum())?;

    let n0_km = if utm.is_northern() { 0.0 } else { N0_SOUTH_KM };
    let xi = (utm.northing() / 1000.0 - n0_km) / K0_A_KM;
    let eta = (utm.easting() / 1000.0 - E0_KM) / K0_A_KM;

    let xi_p = xi
        - (BETA1 * (2.0 * xi).sin() * (2.0 * eta).cosh()
            + BETA2 * (4.0 * xi).sin() * (4.0 * eta).cosh()
            + BETA3 * (6.0 * xi).sin() * (6.0 * eta).cosh());
    let eta_p = eta
        - (BETA1 * (2.0 * xi).cos() * (2.0 * eta).sinh()
            + BETA2 * (4.0 * xi).cos() * (4.0 * eta).sinh()
            + BETA3 * (6.0 * xi).cos() * (6.0 * eta).sinh());

    let chi = (xi_p.sin() / eta_p.cosh()).asin();
    let phi = chi
        + DELTA1 * (2.0 * chi).sin()
        + DELTA2 * (4.0 * chi).sin()
        + DELTA3 * (6.0 * chi).sin();
    let lambda = central_meridian_rad(utm.zone()) + (eta_p.sinh() / xi_p.cos()).atan();

    GeographicCoordinate::new(
        phi.to_degrees(),
        lambda.to_degrees(),
        utm.altitude(),
        utm.datum(),
    )
}

/// Convert a slice of UTM coordinates to geographic in one call.
///
/// Returns an owned buffer sized to the input; used by tile synthesis where
/// every output pixel position needs converting.
pub fn utm_to_geographic_batch(points: &[UtmCoordinate]) -> Result<Vec<GeographicCoordinate>> {
    points.iter().map(utm_to_geographic).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zone_selection() {
        let seattle = GeographicCoordinate::new(47.6062, -122.3321, 0.0, Datum::Wgs84).unwrap();
        assert_eq!(utm_zone_for(&seattle), 10);

        let sydney = GeographicCoordinate::new(-33.8688, 151.2093, 0.0, Datum::Wgs84).unwrap();
        assert_eq!(utm_zone_for(&sydney), 56);

        let antimeridian = GeographicCoordinate::new(0.0, 180.0, 0.0, Datum::Wgs84).unwrap();
        assert_eq!(utm_zone_for(&antimeridian), 1);
    }

    #[test]
    fn forward_seattle() {
        let seattle = GeographicCoordinate::new(47.6062, -122.3321, 56.0, Datum::Wgs84).unwrap();
        let utm = geographic_to_utm(&seattle).unwrap();

        assert_eq!(utm.zone(), 10);
        assert!(utm.is_northern());
        assert!(utm.easting() > 549_500.0 && utm.easting() < 551_000.0, "easting {}", utm.easting());
        assert!(
            utm.northing() > 5_271_500.0 && utm.northing() < 5_273_500.0,
            "northing {}",
            utm.northing()
        );
        assert_eq!(utm.altitude(), 56.0);
    }

    #[test]
    fn round_trip_northern() {
        let point = GeographicCoordinate::new(47.6062, -122.3321, 0.0, Datum::Wgs84).unwrap();
        let back = utm_to_geographic(&geographic_to_utm(&point).unwrap()).unwrap();
        assert_relative_eq!(back.latitude(), point.latitude(), epsilon = 1e-7);
        assert_relative_eq!(back.longitude(), point.longitude(), epsilon = 1e-7);
    }

    #[test]
    fn round_trip_southern() {
        let point = GeographicCoordinate::new(-33.8688, 151.2093, 0.0, Datum::Wgs84).unwrap();
        let utm = geographic_to_utm(&point).unwrap();
        assert!(!utm.is_northern());

        let back = utm_to_geographic(&utm).unwrap();
        assert_relative_eq!(back.latitude(), point.latitude(), epsilon = 1e-7);
        assert_relative_eq!(back.longitude(), point.longitude(), epsilon = 1e-7);
    }

    #[test]
    fn batch_matches_single() {
        let corners = [
            GeographicCoordinate::new(47.0, -123.0, 0.0, Datum::Wgs84).unwrap(),
            GeographicCoordinate::new(47.5, -122.5, 0.0, Datum::Wgs84).unwrap(),
            GeographicCoordinate::new(48.0, -122.0, 0.0, Datum::Wgs84).unwrap(),
        ];
        let utms: Vec<_> = corners
            .iter()
            .map(|c| geographic_to_utm(c).unwrap())
            .collect();

        let batch = utm_to_geographic_batch(&utms).unwrap();
        assert_eq!(batch.len(), utms.len());
        for (single, from_batch) in corners.iter().zip(&batch) {
            assert_relative_eq!(from_batch.latitude(), single.latitude(), epsilon = 1e-7);
            assert_relative_eq!(from_batch.longitude(), single.longitude(), epsilon = 1e-7);
        }
    }

    #[test]
    fn unknown_datum_is_rejected() {
        let point = GeographicCoordinate::new(47.0, -123.0, 0.0, Datum::Unknown).unwrap();
        assert!(matches!(
            geographic_to_utm(&point),
            Err(GeoError::UnsupportedDatum(Datum::Unknown))
        ));
    }

    #[test]
    fn polar_latitude_is_rejected() {
        let point = GeographicCoordinate::new(87.0, 10.0, 0.0, Datum::Wgs84).unwrap();
        assert!(matches!(
            geographic_to_utm(&point),
            Err(GeoError::OutsideUtmDomain(_))
        ));
    }
}
