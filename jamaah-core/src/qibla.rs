//! Qibla bearing and great-circle distance on a spherical Earth.

use serde::{Deserialize, Serialize};

use crate::constants::EARTH_RADIUS_KM;
use crate::error::{CoreError, CoreResult};

/// Geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// The Kaaba in Makkah.
pub const KAABA: GeoPoint = GeoPoint::new(21.4225, 39.8262);

impl GeoPoint {
    /// Creates a point without range checks. The math below accepts any finite input.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint { latitude, longitude }
    }

    /// Creates a point, rejecting latitudes outside [-90, 90] and longitudes
    /// outside [-180, 180].
    pub fn validated(latitude: f64, longitude: f64) -> CoreResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::InvalidCoordinate(format!(
                "latitude {latitude} out of range [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::InvalidCoordinate(format!(
                "longitude {longitude} out of range [-180, 180]"
            )));
        }
        Ok(GeoPoint::new(latitude, longitude))
    }
}

/// Initial great-circle bearing from `origin` to `destination`, degrees clockwise
/// from true north in [0, 360).
pub fn bearing(origin: GeoPoint, destination: GeoPoint) -> f64 {
    let phi1 = origin.latitude.to_radians();
    let phi2 = destination.latitude.to_radians();
    let delta_lambda = (destination.longitude - origin.longitude).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Haversine distance in kilometres.
pub fn distance_km(origin: GeoPoint, destination: GeoPoint) -> f64 {
    let phi1 = origin.latitude.to_radians();
    let phi2 = destination.latitude.to_radians();
    let delta_phi = phi2 - phi1;
    let delta_lambda = (destination.longitude - origin.longitude).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Wrap any angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Direction and distance to the Kaaba.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Qibla {
    pub bearing: f64,
    pub distance_km: f64,
}

pub fn qibla(origin: GeoPoint) -> Qibla {
    Qibla {
        bearing: bearing(origin, KAABA),
        distance_km: distance_km(origin, KAABA),
    }
}

/// Signed turn from `heading` to `target`, in (-180, 180]. Positive is clockwise.
pub fn heading_delta(heading: f64, target: f64) -> f64 {
    let delta = (target - heading).rem_euclid(360.0);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// What the compass should tell the user to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alignment {
    Aligned,
    /// Turn counter-clockwise by this many degrees
    TurnLeft(f64),
    /// Turn clockwise by this many degrees
    TurnRight(f64),
}

pub fn alignment(heading: f64, target: f64, threshold: f64) -> Alignment {
    let delta = heading_delta(heading, target);
    if delta.abs() < threshold {
        Alignment::Aligned
    } else if delta < 0.0 {
        Alignment::TurnLeft(-delta)
    } else {
        Alignment::TurnRight(delta)
    }
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass label for a bearing.
pub fn compass_point(bearing: f64) -> &'static str {
    let index = (normalize_degrees(bearing) / 22.5).round() as usize % 16;
    COMPASS_POINTS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAKARTA: GeoPoint = GeoPoint::new(-6.2088, 106.8456);
    const LONDON: GeoPoint = GeoPoint::new(51.5074, -0.1278);
    const NEW_YORK: GeoPoint = GeoPoint::new(40.7128, -74.0060);

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn qibla_from_known_cities() {
        assert_close(qibla(JAKARTA).bearing, 295.15, 0.2);
        assert_close(qibla(LONDON).bearing, 118.99, 0.2);
        assert_close(qibla(NEW_YORK).bearing, 58.48, 0.2);
    }

    #[test]
    fn distance_to_kaaba_from_jakarta() {
        assert_close(qibla(JAKARTA).distance_km, 7920.0, 25.0);
    }

    #[test]
    fn cardinal_bearings() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert_close(bearing(origin, GeoPoint::new(10.0, 0.0)), 0.0, 1e-9);
        assert_close(bearing(origin, GeoPoint::new(0.0, 10.0)), 90.0, 1e-9);
        assert_close(bearing(origin, GeoPoint::new(-10.0, 0.0)), 180.0, 1e-9);
        assert_close(bearing(origin, GeoPoint::new(0.0, -10.0)), 270.0, 1e-9);
    }

    #[test]
    fn bearing_is_in_range() {
        for &(a, b) in &[(JAKARTA, LONDON), (LONDON, NEW_YORK), (NEW_YORK, KAABA)] {
            let deg = bearing(a, b);
            assert!((0.0..360.0).contains(&deg), "{deg}");
        }
    }

    #[test]
    fn reverse_bearing_on_equator_differs_by_half_turn() {
        let a = GeoPoint::new(0.0, 10.0);
        let b = GeoPoint::new(0.0, 40.0);
        assert_close(heading_delta(bearing(a, b), bearing(b, a)).abs(), 180.0, 1e-9);
    }

    #[test]
    fn reverse_bearing_along_meridian_differs_by_half_turn() {
        let a = GeoPoint::new(-30.0, 25.0);
        let b = GeoPoint::new(45.0, 25.0);
        assert_close(heading_delta(bearing(a, b), bearing(b, a)).abs(), 180.0, 1e-9);
    }

    #[test]
    fn bearings_between_distant_cities() {
        // Great-circle headings are not reverses of each other off the equator and meridians
        let outbound = bearing(JAKARTA, LONDON);
        let inbound = bearing(LONDON, JAKARTA);
        assert_close(outbound, 321.87, 0.05);
        assert_close(inbound, 80.46, 0.05);
        assert!((heading_delta(outbound, inbound).abs() - 180.0).abs() > 30.0);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        assert_eq!(distance_km(LONDON, LONDON), 0.0);
        assert_close(distance_km(LONDON, NEW_YORK), distance_km(NEW_YORK, LONDON), 1e-9);
        assert_close(distance_km(LONDON, NEW_YORK), 5570.0, 15.0);
    }

    #[test]
    fn distance_grows_with_separation() {
        let origin = GeoPoint::new(0.0, 0.0);
        let mut previous = 0.0;
        for lon in 1..=180 {
            let d = distance_km(origin, GeoPoint::new(0.0, f64::from(lon)));
            assert!(d > previous);
            previous = d;
        }
    }

    #[test]
    fn delta_wraps_into_half_open_range() {
        assert_close(heading_delta(350.0, 10.0), 20.0, 1e-9);
        assert_close(heading_delta(10.0, 350.0), -20.0, 1e-9);
        assert_close(heading_delta(0.0, 180.0), 180.0, 1e-9);
        assert_close(heading_delta(180.0, 0.0), 180.0, 1e-9);
        assert_close(heading_delta(90.0, 90.0), 0.0, 1e-9);
    }

    #[test]
    fn alignment_hints() {
        assert_eq!(alignment(293.0, 295.0, 5.0), Alignment::Aligned);
        assert_eq!(alignment(250.0, 295.0, 5.0), Alignment::TurnRight(45.0));
        assert_eq!(alignment(300.0, 10.0, 5.0), Alignment::TurnRight(70.0));
        assert_eq!(alignment(20.0, 300.0, 5.0), Alignment::TurnLeft(80.0));
    }

    #[test]
    fn normalizes_negative_angles() {
        assert_close(normalize_degrees(-90.0), 270.0, 1e-9);
        assert_close(normalize_degrees(720.5), 0.5, 1e-9);
    }

    #[test]
    fn compass_labels() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(295.15), "WNW");
        assert_eq!(compass_point(118.99), "ESE");
        assert_eq!(compass_point(359.0), "N");
    }

    #[test]
    fn validated_rejects_out_of_range() {
        assert!(GeoPoint::validated(91.0, 0.0).is_err());
        assert!(GeoPoint::validated(0.0, -181.0).is_err());
        assert!(GeoPoint::validated(-6.2, 106.8).is_ok());
    }
}
