//! Geo lookup: representative postal code and coordinates per state
//!
//! Coordinates are approximate state centroids. Unknown codes resolve to
//! the continental-US fallback instead of failing.

use serde::Serialize;

pub const FALLBACK_POSTAL_CODE: &str = "10001";
pub const FALLBACK_LATITUDE: f64 = 40.0;
pub const FALLBACK_LONGITUDE: f64 = -100.0;

/// Resolved location for a state code
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub postal_code: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const FALLBACK: GeoPoint = GeoPoint {
        postal_code: FALLBACK_POSTAL_CODE,
        latitude: FALLBACK_LATITUDE,
        longitude: FALLBACK_LONGITUDE,
    };
}

// (code, postal code, latitude, longitude)
const GEO_TABLE: [(&str, &str, f64, f64); 50] = [
    ("AL", "35203", 32.806671, -86.791130),
    ("AK", "99501", 61.370716, -152.404419),
    ("AZ", "85001", 33.729759, -111.431221),
    ("AR", "72201", 34.969704, -92.373123),
    ("CA", "90001", 36.116203, -119.681564),
    ("CO", "80201", 39.059811, -105.311104),
    ("CT", "06101", 41.597782, -72.755371),
    ("DE", "19901", 39.318523, -75.507141),
    ("FL", "32301", 27.766279, -81.686783),
    ("GA", "30301", 33.040619, -83.643074),
    ("HI", "96801", 21.094318, -157.498337),
    ("ID", "83701", 44.240459, -114.478828),
    ("IL", "60601", 40.349457, -88.986137),
    ("IN", "46201", 39.849426, -86.258278),
    ("IA", "50301", 42.011539, -93.210526),
    ("KS", "66101", 38.526600, -96.726486),
    ("KY", "40201", 37.668140, -84.670067),
    ("LA", "70112", 31.169546, -91.867805),
    ("ME", "04101", 44.693947, -69.381927),
    ("MD", "21201", 39.063946, -76.802101),
    ("MA", "02101", 42.230171, -71.530106),
    ("MI", "48201", 43.326618, -84.536095),
    ("MN", "55101", 45.694454, -93.900192),
    ("MS", "39201", 32.741646, -89.678696),
    ("MO", "63101", 38.456085, -92.288368),
    ("MT", "59601", 46.921925, -110.454353),
    ("NE", "68501", 41.125370, -98.268082),
    ("NV", "89501", 38.313515, -117.055374),
    ("NH", "03301", 43.452492, -71.563896),
    ("NJ", "07101", 40.298904, -74.521011),
    ("NM", "87101", 34.840515, -106.248482),
    ("NY", "10001", 42.165726, -74.948051),
    ("NC", "27601", 35.630066, -79.806419),
    ("ND", "58501", 47.528912, -99.784012),
    ("OH", "43201", 40.388783, -82.764915),
    ("OK", "73101", 35.565342, -96.928917),
    ("OR", "97201", 44.572021, -122.070938),
    ("PA", "19101", 40.590752, -77.209755),
    ("RI", "02901", 41.680893, -71.511780),
    ("SC", "29201", 33.856892, -80.945007),
    ("SD", "57501", 44.299782, -99.438828),
    ("TN", "37201", 35.747845, -86.692345),
    ("TX", "73301", 31.054487, -97.563461),
    ("UT", "84101", 40.150032, -111.862434),
    ("VT", "05601", 44.045876, -72.710686),
    ("VA", "23218", 37.769337, -78.169968),
    ("WA", "98101", 47.400902, -121.490494),
    ("WV", "25301", 38.491226, -80.954453),
    ("WI", "53701", 44.268543, -89.616508),
    ("WY", "82001", 42.755966, -107.302490),
];

/// Look up the representative location for a state code.
/// Unrecognized codes get [`GeoPoint::FALLBACK`].
#[must_use]
pub fn lookup(state_code: &str) -> GeoPoint {
    let code = state_code.trim();
    GEO_TABLE
        .iter()
        .find(|(c, ..)| c.eq_ignore_ascii_case(code))
        .map_or(GeoPoint::FALLBACK, |&(_, postal_code, latitude, longitude)| {
            GeoPoint {
                postal_code,
                latitude,
                longitude,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::STATES;

    #[test]
    fn test_every_catalogued_state_resolves() {
        for state in &STATES {
            assert!(
                GEO_TABLE.iter().any(|(code, ..)| *code == state.code),
                "{} missing from geo table",
                state.code
            );
            let point = lookup(state.code);
            assert_eq!(point.postal_code.len(), 5);
            assert!(point.postal_code.chars().all(|c| c.is_ascii_digit()));
            assert!((-90.0..=90.0).contains(&point.latitude));
            assert!((-180.0..=180.0).contains(&point.longitude));
        }
    }

    #[test]
    fn test_known_state() {
        let point = lookup("CA");
        assert_eq!(point.postal_code, "90001");
        assert_eq!(point.latitude, 36.116203);
        assert_eq!(point.longitude, -119.681564);
        assert_eq!(lookup("ca"), point);
    }

    #[test]
    fn test_unknown_state_falls_back() {
        assert_eq!(lookup("ZZ"), GeoPoint::FALLBACK);
        assert_eq!(lookup(""), GeoPoint::FALLBACK);
    }
}
