//! Geographic helpers used by the cost estimates and the detour search.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to another point in kilometres (haversine).
    pub fn distance_km(&self, other: &Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().min(1.0).asin();

        EARTH_RADIUS_KM * c
    }

    /// Distance in kilometres from this point to the segment `start`-`end`.
    ///
    /// The closest point is found by projecting in degree space and clamping
    /// to the segment; the final distance is measured on the sphere.
    pub fn distance_to_segment_km(&self, start: &Self, end: &Self) -> f64 {
        let seg_lat = end.lat - start.lat;
        let seg_lng = end.lng - start.lng;
        let length_squared = seg_lat * seg_lat + seg_lng * seg_lng;

        if length_squared == 0.0 {
            return self.distance_km(start);
        }

        let t = ((self.lat - start.lat) * seg_lat + (self.lng - start.lng) * seg_lng)
            / length_squared;
        let t = t.clamp(0.0, 1.0);
        let closest = GeoPoint::new(start.lat + t * seg_lat, start.lng + t * seg_lng);
        self.distance_km(&closest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = GeoPoint::new(18.0, -76.8);
        assert_eq!(p.distance_km(&p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        let d = a.distance_km(&b);
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(18.012079, -76.797419);
        let b = GeoPoint::new(17.9991, -76.9525);
        assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-12);
    }

    #[test]
    fn segment_distance_uses_perpendicular_foot() {
        let start = GeoPoint::new(0.0, 0.0);
        let end = GeoPoint::new(0.0, 2.0);
        let above = GeoPoint::new(0.1, 1.0);
        let expected = above.distance_km(&GeoPoint::new(0.0, 1.0));
        assert!((above.distance_to_segment_km(&start, &end) - expected).abs() < 1e-9);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let start = GeoPoint::new(0.0, 0.0);
        let end = GeoPoint::new(0.0, 1.0);
        let beyond = GeoPoint::new(0.0, 3.0);
        let expected = beyond.distance_km(&end);
        assert!((beyond.distance_to_segment_km(&start, &end) - expected).abs() < 1e-9);
    }

    #[test]
    fn degenerate_segment_measures_to_start() {
        let start = GeoPoint::new(18.0, -76.8);
        let p = GeoPoint::new(18.1, -76.8);
        assert_eq!(p.distance_to_segment_km(&start, &start), p.distance_km(&start));
    }
}
