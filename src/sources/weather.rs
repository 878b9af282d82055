//! Current conditions from wttr.in.
//!
//! The service resolves the place name itself, so the city name is sent as-is
//! (URL-escaped) rather than coordinates. Only the first entry of
//! `current_condition` is used.

use serde::Deserialize;
use serde_json::Value;

use super::{HttpClient, SourceError, absent_on_error, numeric};

/// Current weather for a place. Each field is independently optional: a
/// report with missing fields is still a report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherReport {
    pub description: Option<String>,
    pub temperature_c: Option<f64>,
    pub feels_like_c: Option<f64>,
    pub humidity: Option<u8>,
    /// Observation time as reported by the service (UTC).
    pub observed_at: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
pub trait WeatherSource {
    /// Current conditions for `place`, or `None` if the fetch failed entirely.
    fn current(&self, place: &str) -> Option<WeatherReport>;
}

#[derive(Debug, Deserialize)]
struct WttrResponse {
    current_condition: Vec<WttrCondition>,
}

#[derive(Debug, Deserialize)]
struct WttrCondition {
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<WttrText>,
    #[serde(rename = "temp_C")]
    temp_c: Option<Value>,
    #[serde(rename = "FeelsLikeC")]
    feels_like_c: Option<Value>,
    humidity: Option<Value>,
    observation_time: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct WttrText {
    value: Option<String>,
}

/// Parse a `format=j1` body into a report.
pub fn parse_weather(body: &str) -> Result<WeatherReport, SourceError> {
    let response: WttrResponse = serde_json::from_str(body)?;
    let current = response
        .current_condition
        .into_iter()
        .next()
        .ok_or(SourceError::NotFound)?;

    let description = current
        .weather_desc
        .into_iter()
        .filter_map(|text| text.value)
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty());

    let humidity = numeric(current.humidity.as_ref())
        .filter(|h| (0.0..=100.0).contains(h))
        .map(|h| h.round() as u8);

    Ok(WeatherReport {
        description,
        temperature_c: numeric(current.temp_c.as_ref()),
        feels_like_c: numeric(current.feels_like_c.as_ref()),
        humidity,
        observed_at: current
            .observation_time
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|time| !time.is_empty())
            .map(str::to_string),
    })
}

/// Weather client for wttr.in.
#[derive(Debug, Clone)]
pub struct WttrClient {
    http: HttpClient,
    base_url: String,
}

impl WttrClient {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn request_url(&self, place: &str) -> String {
        format!(
            "{}/{}?format=j1",
            self.base_url,
            urlencoding::encode(place)
        )
    }

    fn try_current(&self, place: &str) -> Result<WeatherReport, SourceError> {
        let body = self.http.get_text(&self.request_url(place))?;
        parse_weather(&body)
    }
}

impl WeatherSource for WttrClient {
    fn current(&self, place: &str) -> Option<WeatherReport> {
        absent_on_error("weather", place, self.try_current(place))
    }
}
