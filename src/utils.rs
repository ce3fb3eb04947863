/// Utility functions
use crate::domain::GeoPoint;
use serde_json::Value;

/// Metres per degree of latitude in the flat-earth probe approximation
const METERS_PER_DEGREE: f64 = 111_000.0;

/// Extract number from JSON value
pub fn num(v: &Value) -> Option<f64> {
    if let Some(x) = v.as_f64() {
        return Some(x);
    }
    if let Some(s) = v.as_str() {
        return s.trim().parse::<f64>().ok();
    }
    None
}

/// Move `distance_m` from `origin` along a compass bearing.
///
/// Uses a local flat approximation, good enough for probes a few kilometres out.
pub fn offset_point(origin: GeoPoint, distance_m: f64, bearing_deg: f64) -> GeoPoint {
    let rad = bearing_deg.to_radians();
    let dx = distance_m * rad.sin();
    let dy = distance_m * rad.cos();
    let lon_scale = METERS_PER_DEGREE * origin.lat.to_radians().cos().max(0.0001);
    GeoPoint {
        lat: origin.lat + dy / METERS_PER_DEGREE,
        lon: origin.lon + dx / lon_scale,
    }
}

/// Pick string value from JSON by trying multiple keys
pub fn s_pick(v: &Value, keys: &[&str]) -> Option<String> {
    for k in keys {
        if let Some(x) = v.get(*k) {
            if let Some(s) = x.as_str() {
                if !s.is_empty() {
                    return Some(s.to_string());
                }
            } else if x.is_number() {
                return Some(x.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Calculate distance between two coordinates using Haversine formula
    fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        let rlat1 = lat1.to_radians();
        let rlat2 = lat2.to_radians();
        let dlat = (lat2 - lat1).to_radians();
        let dlon = (lon2 - lon1).to_radians();
        let a = (dlat / 2.0).sin().powi(2) + rlat1.cos() * rlat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        6371.0 * c
    }

    #[test]
    fn test_haversine_km_zero_distance() {
        let distance = haversine_km(0.0, 0.0, 0.0, 0.0);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_haversine_km_known_distance() {
        // London to Paris, roughly 344 km
        let distance = haversine_km(51.5074, -0.1278, 48.8566, 2.3522);
        assert!((distance - 344.0).abs() < 10.0);
    }

    #[test]
    fn test_num_from_float() {
        let json = serde_json::json!(42.5);
        assert_eq!(num(&json), Some(42.5));
    }

    #[test]
    fn test_num_from_string() {
        let json = serde_json::json!(" 42.5 ");
        assert_eq!(num(&json), Some(42.5));
    }

    #[test]
    fn test_num_from_invalid() {
        assert_eq!(num(&serde_json::json!("invalid")), None);
        assert_eq!(num(&serde_json::json!(null)), None);
    }

    #[test]
    fn test_offset_point_north_moves_latitude_only() {
        let p = offset_point(GeoPoint::new(10.0, 20.0), 111_000.0, 0.0);
        assert!((p.lat - 11.0).abs() < 1e-9);
        assert!((p.lon - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_point_east_at_equator() {
        let p = offset_point(GeoPoint::new(0.0, 0.0), 1000.0, 90.0);
        assert!(p.lat.abs() < 1e-9);
        assert!((p.lon - 1000.0 / 111_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_point_distance_matches_haversine() {
        let origin = GeoPoint::new(45.0, 7.0);
        for bearing in [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0] {
            let p = offset_point(origin, 3000.0, bearing);
            let km = haversine_km(origin.lat, origin.lon, p.lat, p.lon);
            assert!((km - 3.0).abs() < 0.05, "bearing {bearing}: {km} km");
        }
    }

    #[test]
    fn test_offset_point_at_pole_stays_finite() {
        let p = offset_point(GeoPoint::new(90.0, 0.0), 1000.0, 90.0);
        assert!(p.lat.is_finite() && p.lon.is_finite());
    }

    #[test]
    fn test_s_pick_finds_first() {
        let json = serde_json::json!({"name": "test", "title": "backup"});
        assert_eq!(s_pick(&json, &["name", "title"]), Some("test".to_string()));
    }

    #[test]
    fn test_s_pick_number_as_string() {
        let json = serde_json::json!({"id": 2465633});
        assert_eq!(s_pick(&json, &["neo_reference_id", "id"]), Some("2465633".to_string()));
    }

    #[test]
    fn test_s_pick_not_found() {
        let json = serde_json::json!({"other": "value"});
        assert_eq!(s_pick(&json, &["name", "title"]), None);
    }
}
