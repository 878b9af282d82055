//! Coordinate → IANA timezone lookup.
//!
//! Uses the tzf-rs polygon database, so no network access is needed.

use std::sync::OnceLock;
use tzf_rs::DefaultFinder;

use super::Coordinates;

#[cfg_attr(test, mockall::automock)]
pub trait TimezoneLookup {
    /// The timezone id containing `coords`, or `None` if there is none.
    fn timezone_at(&self, coords: Coordinates) -> Option<String>;
}

/// Polygon lookup backed by a process-wide `DefaultFinder`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TzfTimezoneLookup;

impl TzfTimezoneLookup {
    pub fn new() -> Self {
        Self
    }

    fn finder() -> &'static DefaultFinder {
        static FINDER: OnceLock<DefaultFinder> = OnceLock::new();
        FINDER.get_or_init(DefaultFinder::new)
    }
}

impl TimezoneLookup for TzfTimezoneLookup {
    fn timezone_at(&self, coords: Coordinates) -> Option<String> {
        if !coords.is_valid() {
            return None;
        }

        // Note: tzf-rs uses (longitude, latitude) order
        let name = Self::finder().get_tz_name(coords.longitude, coords.latitude);

        if name.is_empty() || name.parse::<chrono_tz::Tz>().is_err() {
            return None;
        }
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_cities() {
        let lookup = TzfTimezoneLookup::new();
        let test_cases = vec![
            (40.7128, -74.0060, "America/New_York"),
            (51.5074, -0.1278, "Europe/London"),
            (35.6762, 139.6503, "Asia/Tokyo"),
            (-33.8688, 151.2093, "Australia/Sydney"),
            (48.8566, 2.3522, "Europe/Paris"),
            (64.1466, -21.9426, "Atlantic/Reykjavik"),
        ];

        for (lat, lon, expected) in test_cases {
            let coords = Coordinates::new(lat, lon).unwrap();
            assert_eq!(
                lookup.timezone_at(coords).as_deref(),
                Some(expected),
                "wrong timezone for ({}, {})",
                lat,
                lon
            );
        }
    }

    #[test]
    fn test_invalid_coordinates_are_absent() {
        let lookup = TzfTimezoneLookup::new();
        let bogus = Coordinates {
            latitude: 200.0,
            longitude: 0.0,
        };
        assert_eq!(lookup.timezone_at(bogus), None);

        let nan = Coordinates {
            latitude: f64::NAN,
            longitude: 10.0,
        };
        assert_eq!(lookup.timezone_at(nan), None);
    }

    #[test]
    fn test_any_answer_is_a_valid_tz() {
        let lookup = TzfTimezoneLookup::new();
        // Mid-Pacific: either an Etc/ zone or nothing, never garbage.
        let ocean = Coordinates::new(0.0, -150.0).unwrap();
        if let Some(name) = lookup.timezone_at(ocean) {
            assert!(name.parse::<chrono_tz::Tz>().is_ok());
        }
    }
}
