//! City resolution pipeline.
//!
//! Turns a free-text city name into a [`ResolutionResult`]:
//!
//! 1. Timezone: registry first (the stored value is used verbatim, even when
//!    empty), otherwise geocode the name and look up the timezone at the
//!    resulting coordinates.
//! 2. Weather, fetched by name.
//! 3. Encyclopedia summary.
//!
//! The three steps are independent. Each source either contributes or is
//! absent; nothing one source does can stop another from being attempted.
//! Calls run one after another on the calling thread.

use anyhow::Result;

use crate::config::Config;
use crate::geo::{Coordinates, Geocoder, NominatimGeocoder, TimezoneLookup, TzfTimezoneLookup};
use crate::logger::Log;
use crate::registry::Registry;
use crate::sources::{HttpClient, SummarySource, WeatherReport, WeatherSource, WikipediaClient, WttrClient};

/// Where a city's timezone came from.
#[derive(Debug, Clone, PartialEq)]
pub enum TimezoneOrigin {
    /// The registry had the city. An empty stored value still counts.
    Registry,
    /// Geocoded to these coordinates.
    Geocoded(Coordinates),
    /// Neither the registry nor geocoding found the city.
    Unknown,
}

/// Everything learned about one city. Built per lookup, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionResult {
    pub city: String,
    /// Non-empty IANA timezone id, if any source produced one.
    pub timezone: Option<String>,
    pub origin: TimezoneOrigin,
    pub weather: Option<WeatherReport>,
    pub summary: Option<String>,
}

impl ResolutionResult {
    /// True when the city is registered with an empty timezone.
    pub fn is_registered_without_timezone(&self) -> bool {
        self.origin == TimezoneOrigin::Registry && self.timezone.is_none()
    }
}

/// The external collaborators used to resolve a city.
pub struct CityResolver {
    geocoder: Box<dyn Geocoder>,
    timezones: Box<dyn TimezoneLookup>,
    weather: Box<dyn WeatherSource>,
    summaries: Box<dyn SummarySource>,
    summary_max_chars: usize,
}

impl CityResolver {
    pub fn new(
        geocoder: Box<dyn Geocoder>,
        timezones: Box<dyn TimezoneLookup>,
        weather: Box<dyn WeatherSource>,
        summaries: Box<dyn SummarySource>,
        summary_max_chars: usize,
    ) -> Self {
        Self {
            geocoder,
            timezones,
            weather,
            summaries,
            summary_max_chars,
        }
    }

    /// Wire up the real network-backed sources from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = HttpClient::new(config.request_timeout_secs())?;

        Ok(Self::new(
            Box::new(NominatimGeocoder::new(http.clone(), config.geocoder_url())),
            Box::new(TzfTimezoneLookup::new()),
            Box::new(WttrClient::new(http.clone(), config.weather_url())),
            Box::new(WikipediaClient::new(
                http,
                config.encyclopedia_url(),
                config.summary_languages(),
            )),
            config.summary_max_chars(),
        ))
    }

    /// Geocode `name` and look up the timezone at its coordinates.
    ///
    /// Skips the registry entirely; the editor uses this to fill in a
    /// timezone for a new city.
    pub fn lookup_timezone(&self, name: &str) -> Option<(String, Coordinates)> {
        let coords = self.geocoder.geocode(name)?;
        Log::log_debug(&format!("{} is at {}", name, coords));
        let timezone = self.timezones.timezone_at(coords)?;
        (!timezone.is_empty()).then_some((timezone, coords))
    }

    /// Resolve the timezone for `name`, registry first.
    pub fn resolve_timezone(
        &self,
        name: &str,
        registry: &Registry,
    ) -> (Option<String>, TimezoneOrigin) {
        if let Some(stored) = registry.get(name) {
            Log::log_debug(&format!("{} is registered as {:?}", name, stored));
            let timezone = (!stored.is_empty()).then(|| stored.to_string());
            return (timezone, TimezoneOrigin::Registry);
        }

        match self.geocoder.geocode(name) {
            Some(coords) => {
                let timezone = self
                    .timezones
                    .timezone_at(coords)
                    .filter(|tz| !tz.is_empty());
                (timezone, TimezoneOrigin::Geocoded(coords))
            }
            None => (None, TimezoneOrigin::Unknown),
        }
    }

    pub fn resolve_city(&self, name: &str, registry: &Registry) -> ResolutionResult {
        let (timezone, origin) = self.resolve_timezone(name, registry);
        let weather = self.weather.current(name);
        let summary = self.summaries.summary(name, self.summary_max_chars);

        ResolutionResult {
            city: name.to_string(),
            timezone,
            origin,
            weather,
            summary,
        }
    }
}
