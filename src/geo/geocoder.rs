//! Forward geocoding: convert a place name to coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use serde::Deserialize;
use serde_json::Value;

use super::Coordinates;
use crate::sources::{HttpClient, SourceError, absent_on_error, numeric};

#[cfg_attr(test, mockall::automock)]
pub trait Geocoder {
    /// Coordinates of the best match for `name`, or `None` on no match,
    /// timeout or malformed response.
    fn geocode(&self, name: &str) -> Option<Coordinates>;
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: Option<Value>,
    lon: Option<Value>,
    #[allow(dead_code)]
    display_name: Option<String>,
}

/// Parse a Nominatim `search` response (a JSON array) and take the first hit.
pub fn parse_search_results(body: &str) -> Result<Coordinates, SourceError> {
    let places: Vec<NominatimPlace> = serde_json::from_str(body)?;
    let first = places.into_iter().next().ok_or(SourceError::NotFound)?;

    // Nominatim sends "35.68" but numbers are accepted too
    let latitude = numeric(first.lat.as_ref())
        .ok_or_else(|| SourceError::Unavailable(format!("bad latitude {:?}", first.lat)))?;
    let longitude = numeric(first.lon.as_ref())
        .ok_or_else(|| SourceError::Unavailable(format!("bad longitude {:?}", first.lon)))?;

    Coordinates::new(latitude, longitude).ok_or_else(|| {
        SourceError::Unavailable(format!("coordinates out of range: {}, {}", latitude, longitude))
    })
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: HttpClient,
    search_url: String,
}

impl NominatimGeocoder {
    pub fn new(http: HttpClient, search_url: &str) -> Self {
        Self {
            http,
            search_url: search_url.to_string(),
        }
    }

    pub fn request_url(&self, name: &str) -> String {
        format!(
            "{}?q={}&format=json&limit=1",
            self.search_url,
            urlencoding::encode(name)
        )
    }

    fn try_geocode(&self, name: &str) -> Result<Coordinates, SourceError> {
        let body = self.http.get_text(&self.request_url(name))?;
        parse_search_results(&body)
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, name: &str) -> Option<Coordinates> {
        absent_on_error("geocoder", name, self.try_geocode(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_result() {
        let body = r#"[
            {"lat": "64.1459810", "lon": "-21.9422367", "display_name": "Reykjavík, Iceland"},
            {"lat": "0", "lon": "0", "display_name": "elsewhere"}
        ]"#;
        let coords = parse_search_results(body).unwrap();
        assert!((coords.latitude - 64.145981).abs() < 1e-6);
        assert!((coords.longitude + 21.9422367).abs() < 1e-6);
    }

    #[test]
    fn test_parse_numeric_coordinates() {
        let coords = parse_search_results(r#"[{"lat": 35.6, "lon": 139.7}]"#).unwrap();
        assert_eq!(coords, Coordinates::new(35.6, 139.7).unwrap());
    }

    #[test]
    fn test_parse_missing_coordinates_is_unavailable() {
        assert!(matches!(
            parse_search_results(r#"[{"display_name": "Nowhere"}]"#),
            Err(SourceError::Unavailable(_))
        ));
    }

    #[test]
    fn test_parse_no_results() {
        assert!(matches!(
            parse_search_results("[]"),
            Err(SourceError::NotFound)
        ));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_search_results(r#"{"error": "Unable to geocode"}"#),
            Err(SourceError::Unavailable(_))
        ));
        assert!(matches!(
            parse_search_results(r#"[{"lat": "north", "lon": "1.0"}]"#),
            Err(SourceError::Unavailable(_))
        ));
        assert!(matches!(
            parse_search_results(r#"[{"lat": "123.0", "lon": "1.0"}]"#),
            Err(SourceError::Unavailable(_))
        ));
    }

    #[test]
    fn test_request_url() {
        let geocoder = NominatimGeocoder::new(
            HttpClient::new(1).unwrap(),
            "https://nominatim.openstreetmap.org/search",
        );
        assert_eq!(
            geocoder.request_url("São Paulo"),
            "https://nominatim.openstreetmap.org/search?q=S%C3%A3o%20Paulo&format=json&limit=1"
        );
    }

    #[test]
    fn test_geocode_unreachable_is_absent() {
        let geocoder = NominatimGeocoder::new(HttpClient::new(1).unwrap(), "http://127.0.0.1:9/search");
        assert_eq!(geocoder.geocode("Tokyo"), None);
    }
}
