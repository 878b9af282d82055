//! External data sources and the blocking HTTP transport they share.
//!
//! Every source has a fallible inner call returning [`SourceError`] and a
//! public trait method returning `Option`. The conversion happens at the
//! source boundary, where the failure is logged in debug mode and then
//! dropped: a failing source never aborts the caller.

pub mod summary;
pub mod weather;

pub use summary::{SummarySource, WikipediaClient};
pub use weather::{WeatherReport, WeatherSource, WttrClient};

use reqwest::blocking::Client;
use std::time::Duration;

use crate::constants::USER_AGENT;
use crate::logger::Log;

/// Why a source produced nothing.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source answered but had nothing for this key.
    #[error("no match")]
    NotFound,
    /// Network failure, timeout, non-2xx status or malformed body.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SourceError::Unavailable("request timed out".to_string())
        } else {
            SourceError::Unavailable(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Unavailable(format!("malformed response: {}", e))
    }
}

/// Shared blocking HTTP client with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and return the body of a 2xx response.
    pub fn get_text(&self, url: &str) -> Result<String, SourceError> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(SourceError::Unavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        Ok(response.text()?)
    }
}

/// A JSON number, or a string holding one. Services disagree on which they send.
pub(crate) fn numeric(value: Option<&serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Convert a source result to an `Option`, logging the failure in debug mode.
pub(crate) fn absent_on_error<T>(
    source: &str,
    key: &str,
    result: Result<T, SourceError>,
) -> Option<T> {
    match result {
        Ok(value) => {
            Log::log_debug(&format!("{}: found {}", source, key));
            Some(value)
        }
        Err(e) => {
            Log::log_debug(&format!("{}: {} for {}", source, e, key));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_on_error() {
        assert_eq!(absent_on_error("test", "x", Ok::<_, SourceError>(3)), Some(3));
        assert_eq!(
            absent_on_error::<u8>("test", "x", Err(SourceError::NotFound)),
            None
        );
        assert_eq!(
            absent_on_error::<u8>(
                "test",
                "x",
                Err(SourceError::Unavailable("HTTP 503".to_string()))
            ),
            None
        );
    }

    #[test]
    fn test_numeric_accepts_numbers_and_strings() {
        assert_eq!(numeric(Some(&serde_json::json!(35.6))), Some(35.6));
        assert_eq!(numeric(Some(&serde_json::json!(" 12 "))), Some(12.0));
        assert_eq!(numeric(Some(&serde_json::json!("north"))), None);
        assert_eq!(numeric(Some(&serde_json::json!(null))), None);
        assert_eq!(numeric(None), None);
    }

    #[test]
    fn test_malformed_json_maps_to_unavailable() {
        let err: SourceError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, SourceError::Unavailable(msg) if msg.starts_with("malformed")));
    }

    #[test]
    fn test_unreachable_host_is_unavailable() {
        let client = HttpClient::new(1).unwrap();
        let result = client.get_text("http://127.0.0.1:9/never");
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }
}
