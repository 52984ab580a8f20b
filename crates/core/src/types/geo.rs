//! Geographic coordinates and great-circle distance.
//!
//! The Haversine formula calculates the great-circle distance between two
//! points on a sphere given their longitudes and latitudes. Pricelens uses it
//! to sort shops by how far they are from the viewer.

use serde::{Deserialize, Serialize};

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic position in decimal degrees.
///
/// Out-of-range values are not rejected here; validation happens where
/// external data enters the system (forms, storage boundary).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from decimal degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components converted to radians, as `(lat, lon)`.
    #[must_use]
    pub fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// Deterministic and side-effect free: `haversine_distance(a, b)` equals
/// `haversine_distance(b, a)`, and the distance from a point to itself is 0.
///
/// # Example
/// ```
/// use pricelens_core::{Coordinate, haversine_distance};
///
/// let berlin = Coordinate::new(52.5200, 13.4050);
/// let paris = Coordinate::new(48.8566, 2.3522);
///
/// let distance = haversine_distance(&berlin, &paris);
/// assert!((distance - 878.0).abs() < 10.0);
/// ```
#[inline]
#[must_use]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a =
        (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test data: known distances between cities
    const BERLIN: Coordinate = Coordinate::new(52.5200, 13.4050);
    const PARIS: Coordinate = Coordinate::new(48.8566, 2.3522);
    const SUPELA: Coordinate = Coordinate::new(21.20, 81.35);

    #[test]
    fn test_berlin_to_paris() {
        let distance = haversine_distance(&BERLIN, &PARIS);
        // Expected: ~878 km
        assert!((distance - 878.0).abs() < 5.0, "Berlin-Paris: {distance}");
    }

    #[test]
    fn test_same_point_zero_distance() {
        let distance = haversine_distance(&SUPELA, &SUPELA);
        assert!(distance.abs() < 0.001);
    }

    #[test]
    fn test_symmetry() {
        let out = haversine_distance(&BERLIN, &PARIS);
        let back = haversine_distance(&PARIS, &BERLIN);
        assert!((out - back).abs() < f64::EPSILON);
    }

    #[test]
    fn test_always_non_negative() {
        let near = Coordinate::new(21.19, 81.34);
        assert!(haversine_distance(&SUPELA, &near) > 0.0);
    }

    #[test]
    fn test_colinear_points_additive() {
        // Three points on the same meridian: distances should add up.
        let a = Coordinate::new(10.0, 81.35);
        let b = Coordinate::new(15.0, 81.35);
        let c = Coordinate::new(20.0, 81.35);

        let ab = haversine_distance(&a, &b);
        let bc = haversine_distance(&b, &c);
        let ac = haversine_distance(&a, &c);

        assert!((ac - (ab + bc)).abs() < 0.01, "ac={ac} ab+bc={}", ab + bc);
    }

    #[test]
    fn test_neighbourhood_scale() {
        // Two shops ~1.5 km apart in Supela.
        let alpha = Coordinate::new(21.20, 81.35);
        let beta = Coordinate::new(21.19, 81.34);
        let distance = haversine_distance(&alpha, &beta);
        assert!(distance > 0.5 && distance < 3.0, "distance: {distance}");
    }
}
