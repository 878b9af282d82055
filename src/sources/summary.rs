//! Short plain-text place descriptions from Wikipedia.
//!
//! Languages are tried in configured order (Japanese, then English by
//! default). The first language whose article has a non-empty intro extract
//! wins; errors and empty extracts fall through to the next language.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{HttpClient, SourceError, absent_on_error};
use crate::constants::MISSING_PAGE_ID;
use crate::logger::Log;
use crate::utils::{flatten_lines, truncate_with_marker};

#[cfg_attr(test, mockall::automock)]
pub trait SummarySource {
    /// A description of `title` cut to `max_chars` characters (plus marker),
    /// or `None` if no language produced one.
    fn summary(&self, title: &str, max_chars: usize) -> Option<String>;
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryPages>,
}

#[derive(Debug, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: Map<String, Value>,
}

/// Pull the first usable intro extract out of an `action=query` response.
///
/// The missing-page entry (`"-1"`) is skipped. The extract is flattened to
/// a single line but not truncated.
pub fn parse_extract(body: &str) -> Result<String, SourceError> {
    let response: QueryResponse = serde_json::from_str(body)?;
    let pages = response.query.map(|query| query.pages).unwrap_or_default();

    pages
        .iter()
        .filter(|(page_id, _)| page_id.as_str() != MISSING_PAGE_ID)
        .filter_map(|(_, page)| page.get("extract").and_then(Value::as_str))
        .map(flatten_lines)
        .find(|extract| !extract.is_empty())
        .ok_or(SourceError::NotFound)
}

/// Encyclopedia client trying each language edition in turn.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    http: HttpClient,
    url_template: String,
    languages: Vec<String>,
}

impl WikipediaClient {
    /// `url_template` contains a `{lang}` placeholder for the edition.
    pub fn new(http: HttpClient, url_template: &str, languages: Vec<String>) -> Self {
        Self {
            http,
            url_template: url_template.to_string(),
            languages,
        }
    }

    pub fn request_url(&self, lang: &str, title: &str) -> String {
        format!(
            "{}?action=query&prop=extracts&exintro&explaintext&redirects=1&format=json&titles={}",
            self.url_template.replace("{lang}", lang),
            urlencoding::encode(title)
        )
    }

    fn try_extract(&self, lang: &str, title: &str) -> Result<String, SourceError> {
        let body = self.http.get_text(&self.request_url(lang, title))?;
        parse_extract(&body)
    }
}

/// Try `fetch` for each language in order and return the first extract.
///
/// Stops at the first success; later languages are not queried.
pub fn first_extract<F>(languages: &[String], title: &str, mut fetch: F) -> Option<String>
where
    F: FnMut(&str) -> Result<String, SourceError>,
{
    languages.iter().find_map(|lang| {
        Log::log_debug(&format!("summary: trying {}.wikipedia", lang));
        absent_on_error("summary", title, fetch(lang))
    })
}

impl SummarySource for WikipediaClient {
    fn summary(&self, title: &str, max_chars: usize) -> Option<String> {
        let extract = first_extract(&self.languages, title, |lang| {
            self.try_extract(lang, title)
        })?;
        Some(truncate_with_marker(&extract, max_chars))
    }
}
