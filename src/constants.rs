//! Application constants and default values for cityclock.
//!
//! This module contains the built-in registry, configuration defaults,
//! validation limits and the endpoints of the external data sources.

// ═══ Built-in Registry ═══
// Used whenever no readable registry file exists

pub const DEFAULT_CITIES: &[(&str, &str)] = &[
    ("東京", "Asia/Tokyo"),
    ("ニューヨーク", "America/New_York"),
    ("ロンドン", "Europe/London"),
    ("パリ", "Europe/Paris"),
    ("シドニー", "Australia/Sydney"),
    ("ドバイ", "Asia/Dubai"),
    ("バンコク", "Asia/Bangkok"),
];

pub const REGISTRY_FILE_NAME: &str = "cities.json";
pub const CONFIG_DIR_NAME: &str = "cityclock";
pub const CONFIG_FILE_NAME: &str = "cityclock.toml";

// ═══ Application Configuration Defaults ═══

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 300;
pub const DEFAULT_SUMMARY_LANGUAGES: &[&str] = &["ja", "en"];
pub const DEFAULT_HISTORY_LIMIT: usize = 30;

// ═══ Validation Limits ═══

pub const MINIMUM_REQUEST_TIMEOUT_SECS: u64 = 1;
pub const MAXIMUM_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const MINIMUM_SUMMARY_MAX_CHARS: usize = 1;
pub const MAXIMUM_SUMMARY_MAX_CHARS: usize = 5000;
pub const MINIMUM_HISTORY_LIMIT: usize = 1;
pub const MAXIMUM_HISTORY_LIMIT: usize = 1000;

// ═══ External Sources ═══

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_WEATHER_URL: &str = "https://wttr.in";
pub const DEFAULT_ENCYCLOPEDIA_URL: &str = "https://{lang}.wikipedia.org/w/api.php";
pub const USER_AGENT: &str = concat!("cityclock/", env!("CARGO_PKG_VERSION"));

/// Page id the encyclopedia uses for titles that do not exist.
pub const MISSING_PAGE_ID: &str = "-1";

/// Appended to a summary that was cut at the character budget.
pub const TRUNCATION_MARKER: char = '…';

// ═══ Exit Codes ═══

pub const EXIT_FAILURE: i32 = 1;
