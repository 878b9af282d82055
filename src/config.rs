//! Configuration system for cityclock.
//!
//! Settings live in an optional TOML file at
//! `$XDG_CONFIG_HOME/cityclock/cityclock.toml`. Every key is optional; a missing
//! file means "all defaults". The same directory holds the city registry
//! (`cities.json`) unless `registry_path` points elsewhere.
//!
//! ```toml
//! registry_path = "/home/me/cities.json"   # City -> timezone registry
//! request_timeout_secs = 10                # Per-request timeout (1-60)
//! summary_max_chars = 300                  # Description length budget (1-5000)
//! summary_languages = ["ja", "en"]         # Encyclopedia languages, in order
//! history_limit = 30                       # Remembered city names (1-1000)
//! home_timezone = "Asia/Tokyo"             # Timezone of the start banner
//!
//! # Endpoints (for mirrors or local testing)
//! geocoder_url = "https://nominatim.openstreetmap.org/search"
//! weather_url = "https://wttr.in"
//! encyclopedia_url = "https://{lang}.wikipedia.org/w/api.php"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::logger::Log;

/// Raw configuration as read from `cityclock.toml`.
///
/// Unset fields fall back to the constants in [`crate::constants`]; the
/// accessor methods apply those defaults so callers never see an `Option`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub registry_path: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
    pub summary_max_chars: Option<usize>,
    pub summary_languages: Option<Vec<String>>,
    pub history_limit: Option<usize>,
    pub home_timezone: Option<String>,
    pub geocoder_url: Option<String>,
    pub weather_url: Option<String>,
    pub encyclopedia_url: Option<String>,
}

impl Config {
    /// Directory holding both the config file and the default registry.
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join(CONFIG_DIR_NAME))
    }

    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load the configuration from the standard location.
    ///
    /// A missing file yields the default configuration. A present but
    /// malformed or invalid file is an error.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path).with_context(|| {
            format!(
                "Failed to load configuration from {}",
                config_path.display()
            )
        })
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        validate_config(&config)?;

        Ok(config)
    }

    /// Resolved registry location: the configured path, else `cities.json`
    /// next to the config file.
    pub fn registry_path(&self) -> Result<PathBuf> {
        match &self.registry_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::get_config_dir()?.join(REGISTRY_FILE_NAME)),
        }
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    pub fn summary_max_chars(&self) -> usize {
        self.summary_max_chars.unwrap_or(DEFAULT_SUMMARY_MAX_CHARS)
    }

    pub fn summary_languages(&self) -> Vec<String> {
        match &self.summary_languages {
            Some(languages) => languages.clone(),
            None => DEFAULT_SUMMARY_LANGUAGES
                .iter()
                .map(|lang| lang.to_string())
                .collect(),
        }
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    /// Parsed `home_timezone`, or `None` to use the system local time.
    pub fn home_timezone(&self) -> Option<chrono_tz::Tz> {
        self.home_timezone
            .as_deref()
            .and_then(|name| name.parse().ok())
    }

    pub fn geocoder_url(&self) -> &str {
        self.geocoder_url.as_deref().unwrap_or(DEFAULT_GEOCODER_URL)
    }

    pub fn weather_url(&self) -> &str {
        self.weather_url.as_deref().unwrap_or(DEFAULT_WEATHER_URL)
    }

    pub fn encyclopedia_url(&self) -> &str {
        self.encyclopedia_url
            .as_deref()
            .unwrap_or(DEFAULT_ENCYCLOPEDIA_URL)
    }

    /// Print the effective settings (debug mode only).
    pub fn log_config(&self) {
        if !Log::is_debug() {
            return;
        }

        let config_path = Self::get_config_path()
            .unwrap_or_else(|_| PathBuf::from("~/.config/cityclock/cityclock.toml"));

        Log::log_block_start(&format!(
            "Configuration: {}",
            crate::utils::path_for_display(&config_path)
        ));
        if let Ok(registry_path) = self.registry_path() {
            Log::log_indented(&format!(
                "Registry: {}",
                crate::utils::path_for_display(&registry_path)
            ));
        }
        Log::log_indented(&format!(
            "Request timeout: {} seconds",
            self.request_timeout_secs()
        ));
        Log::log_indented(&format!(
            "Summary: {} characters from {}",
            self.summary_max_chars(),
            self.summary_languages().join(" → ")
        ));
        Log::log_indented(&format!("History size: {}", self.history_limit()));
    }
}

/// Check every configured value against its allowed range.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(timeout) = config.request_timeout_secs {
        if !(MINIMUM_REQUEST_TIMEOUT_SECS..=MAXIMUM_REQUEST_TIMEOUT_SECS).contains(&timeout) {
            anyhow::bail!(
                "Request timeout ({} seconds) must be between {} and {} seconds",
                timeout,
                MINIMUM_REQUEST_TIMEOUT_SECS,
                MAXIMUM_REQUEST_TIMEOUT_SECS
            );
        }
    }

    if let Some(max_chars) = config.summary_max_chars {
        if !(MINIMUM_SUMMARY_MAX_CHARS..=MAXIMUM_SUMMARY_MAX_CHARS).contains(&max_chars) {
            anyhow::bail!(
                "Summary length ({} characters) must be between {} and {}",
                max_chars,
                MINIMUM_SUMMARY_MAX_CHARS,
                MAXIMUM_SUMMARY_MAX_CHARS
            );
        }
    }

    if let Some(languages) = &config.summary_languages {
        if languages.is_empty() {
            anyhow::bail!("summary_languages must name at least one language");
        }
        if let Some(bad) = languages
            .iter()
            .find(|lang| lang.is_empty() || !lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
        {
            anyhow::bail!("Invalid summary language code: {:?}", bad);
        }
    }

    if let Some(limit) = config.history_limit {
        if !(MINIMUM_HISTORY_LIMIT..=MAXIMUM_HISTORY_LIMIT).contains(&limit) {
            anyhow::bail!(
                "History limit ({}) must be between {} and {}",
                limit,
                MINIMUM_HISTORY_LIMIT,
                MAXIMUM_HISTORY_LIMIT
            );
        }
    }

    if let Some(tz) = &config.home_timezone {
        if tz.parse::<chrono_tz::Tz>().is_err() {
            anyhow::bail!("Unknown home_timezone: {}", tz);
        }
    }

    if let Some(url) = &config.encyclopedia_url {
        if !url.contains("{lang}") {
            anyhow::bail!("encyclopedia_url must contain a {{lang}} placeholder");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, content).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::default();
        assert_eq!(config.request_timeout_secs(), 10);
        assert_eq!(config.summary_max_chars(), 300);
        assert_eq!(config.summary_languages(), vec!["ja", "en"]);
        assert_eq!(config.history_limit(), 30);
        assert_eq!(config.weather_url(), DEFAULT_WEATHER_URL);
        assert!(config.home_timezone().is_none());
    }

    #[test]
    fn test_load_full_config() {
        let (_dir, path) = write_config(
            r#"
registry_path = "/tmp/my-cities.json"
request_timeout_secs = 5
summary_max_chars = 120
summary_languages = ["en", "de"]
history_limit = 10
home_timezone = "Europe/Berlin"
"#,
        );

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(
            config.registry_path().unwrap(),
            PathBuf::from("/tmp/my-cities.json")
        );
        assert_eq!(config.request_timeout_secs(), 5);
        assert_eq!(config.summary_max_chars(), 120);
        assert_eq!(config.summary_languages(), vec!["en", "de"]);
        assert_eq!(config.history_limit(), 10);
        assert_eq!(config.home_timezone(), Some(chrono_tz::Europe::Berlin));
    }

    #[test]
    fn test_timeout_out_of_range() {
        let (_dir, path) = write_config("request_timeout_secs = 0\n");
        let err = Config::load_from_path(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Request timeout"));
    }

    #[test]
    fn test_empty_language_list_rejected() {
        let (_dir, path) = write_config("summary_languages = []\n");
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn test_unknown_home_timezone_rejected() {
        let (_dir, path) = write_config("home_timezone = \"Mars/Olympus\"\n");
        let err = Config::load_from_path(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Mars/Olympus"));
    }

    #[test]
    fn test_encyclopedia_url_requires_placeholder() {
        let (_dir, path) = write_config("encyclopedia_url = \"https://example.org/api.php\"\n");
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let (_dir, path) = write_config("night_temp = 3300\n");
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();

        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        }

        let result = Config::load();
        let registry_path = Config::default().registry_path();

        unsafe {
            match original {
                Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }

        assert_eq!(result.unwrap(), Config::default());
        let registry_path = registry_path.unwrap();
        assert!(registry_path.ends_with("cityclock/cities.json"));
    }
}
