/// Geographic coordinate in degrees (WGS84).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat_deg: f64,
    pub lng_deg: f64,
}

impl LatLng {
    pub const fn new(lat_deg: f64, lng_deg: f64) -> Self {
        Self { lat_deg, lng_deg }
    }

    /// Build from a GeoJSON position, which is ordered `[lon, lat]`.
    pub fn from_lon_lat(lon_deg: f64, lat_deg: f64) -> Self {
        Self::new(lat_deg, lon_deg)
    }

    pub fn is_finite(&self) -> bool {
        self.lat_deg.is_finite() && self.lng_deg.is_finite()
    }

    pub fn is_valid(&self) -> bool {
        self.is_finite() && (-90.0..=90.0).contains(&self.lat_deg)
    }

    /// `[lat, lng]`, the array form accepted by web map widgets.
    pub fn as_array(self) -> [f64; 2] {
        [self.lat_deg, self.lng_deg]
    }
}

/// Mean Earth radius (meters), used for haversine distances.
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;

/// Great-circle distance in meters.
pub fn haversine_m(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat_deg.to_radians();
    let lat2 = b.lat_deg.to_radians();
    let dlat = lat2 - lat1;
    let dlng = (b.lng_deg - a.lng_deg).to_radians();

    let h = (dlat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng * 0.5).sin().powi(2);
    2.0 * EARTH_MEAN_RADIUS_M * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::{LatLng, haversine_m};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn geojson_order_is_swapped() {
        let p = LatLng::from_lon_lat(11.2558, 43.7696);
        assert_eq!(p.lat_deg, 43.7696);
        assert_eq!(p.lng_deg, 11.2558);
        assert_eq!(p.as_array(), [43.7696, 11.2558]);
    }

    #[test]
    fn validity_rejects_out_of_range_latitude() {
        assert!(LatLng::new(45.0, 200.0).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn haversine_one_degree_of_latitude() {
        let d = haversine_m(LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0));
        assert_close(d, 111_195.0, 5.0);
        assert_eq!(haversine_m(LatLng::new(10.0, 10.0), LatLng::new(10.0, 10.0)), 0.0);
    }
}
