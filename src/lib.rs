//! # cityclock
//!
//! Look up a city's local time, current weather and a short encyclopedia
//! summary from the terminal.
//!
//! A city name is resolved in stages: the local city registry first, then
//! geocoding plus an offline coordinate-to-timezone lookup. Weather and
//! summary are fetched independently; any source that fails is simply left
//! out of the report.
//!
//! ## Architecture
//!
//! - **args**: Command-line parsing
//! - **commands**: The lookup loop and the `--manage` editor command
//! - **config**: Optional TOML configuration and validation
//! - **constants**: Application-wide constants and defaults
//! - **editor**: Interactive registry editor state machine
//! - **geo**: Coordinates, geocoding and timezone lookup
//! - **logger**: Structured logging with visual formatting
//! - **prompt**: Line input with Tab completion
//! - **registry**: City-to-timezone registry and its JSON file
//! - **report**: Terminal rendering of results
//! - **resolver**: The resolution pipeline over the external sources
//! - **session**: Per-run registry and city-name history
//! - **sources**: HTTP transport, weather and encyclopedia clients
//! - **utils**: Small text and path helpers

pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod editor;
pub mod geo;
pub mod logger;
pub mod prompt;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod session;
pub mod sources;
pub mod utils;

// Re-export important types for easier access
pub use config::Config;
pub use editor::{EditorOutcome, EditorState, RegistryEditor};
pub use geo::{Coordinates, Geocoder, TimezoneLookup};
pub use logger::{Log, LogLevel};
pub use registry::{Registry, RegistryEntry, RegistryError, RegistryStore};
pub use resolver::{CityResolver, ResolutionResult, TimezoneOrigin};
pub use session::{CityHistory, Session};
pub use sources::{SourceError, SummarySource, WeatherReport, WeatherSource};
