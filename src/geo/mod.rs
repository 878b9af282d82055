//! Geographic lookups: place name → coordinates → timezone.
//!
//! This module provides:
//! - [`Coordinates`], the only geographic type in the crate (never persisted)
//! - Forward geocoding through Nominatim ([`NominatimGeocoder`])
//! - Offline coordinate → IANA timezone lookup ([`TzfTimezoneLookup`])

pub mod geocoder;
pub mod timezone;

pub use geocoder::{Geocoder, NominatimGeocoder};
pub use timezone::{TimezoneLookup, TzfTimezoneLookup};

use std::fmt;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Build coordinates, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let coords = Self {
            latitude,
            longitude,
        };
        coords.is_valid().then_some(coords)
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4}°{}, {:.4}°{}",
            self.latitude.abs(),
            if self.latitude >= 0.0 { "N" } else { "S" },
            self.longitude.abs(),
            if self.longitude >= 0.0 { "E" } else { "W" }
        )
    }
}
