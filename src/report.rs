//! Terminal rendering of city reports.
//!
//! Formatting is kept in small pure functions so it can be tested against a
//! fixed clock; the `print_*` functions only route their output through
//! [`Log`].

use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;

use crate::logger::Log;
use crate::registry::Registry;
use crate::resolver::{ResolutionResult, TimezoneOrigin};
use crate::sources::WeatherReport;

/// Render `now` in the named timezone as `YYYY-MM-DD HH:MM:SS`.
///
/// Returns `None` for ids chrono-tz does not know, which can happen for
/// hand-edited registry values.
pub fn format_local_time(timezone: &str, now: DateTime<Utc>) -> Option<String> {
    let tz: Tz = timezone.parse().ok()?;
    Some(now.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S").to_string())
}

pub fn time_line(result: &ResolutionResult, now: DateTime<Utc>) -> String {
    match &result.timezone {
        Some(tz) => match format_local_time(tz, now) {
            Some(time) => format!("Local time: {} ({})", time, tz),
            None => format!("Could not compute the local time (timezone: {})", tz),
        },
        None if result.is_registered_without_timezone() => {
            format!("{} is registered without a timezone", result.city)
        }
        None => format!("Could not determine the timezone of '{}'", result.city),
    }
}

/// Lines describing a fetched weather report.
///
/// A missing description reads "unknown"; temperature and humidity lines are
/// left out when those fields are missing.
pub fn weather_lines(report: &WeatherReport) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(observed_at) = &report.observed_at {
        lines.push(format!("Observed (UTC): {}", observed_at));
    }
    lines.push(format!(
        "Conditions: {}",
        report.description.as_deref().unwrap_or("unknown")
    ));
    if let Some(temp) = report.temperature_c {
        match report.feels_like_c {
            Some(feels) => lines.push(format!("Temperature: {}°C (feels like {}°C)", temp, feels)),
            None => lines.push(format!("Temperature: {}°C", temp)),
        }
    }
    if let Some(humidity) = report.humidity {
        lines.push(format!("Humidity: {}%", humidity));
    }

    lines
}

/// Print the full report for one city.
pub fn print_report(result: &ResolutionResult, registry: &Registry) {
    Log::log_block_start(&result.city);

    if let TimezoneOrigin::Geocoded(coords) = &result.origin {
        Log::log_debug(&format!("Geocoded to {}", coords));
    }

    Log::log_indented(&time_line(result, Utc::now()));
    if result.timezone.is_none() && !registry.is_empty() {
        let names: Vec<&str> = registry.names().collect();
        Log::log_indented(&format!("Registered cities: {}", names.join(", ")));
    }

    Log::log_pipe();
    match &result.weather {
        Some(report) => {
            for line in weather_lines(report) {
                Log::log_indented(&line);
            }
        }
        None => Log::log_indented(&format!(
            "No weather for {}. Check the network or the city name.",
            result.city
        )),
    }

    Log::log_pipe();
    match &result.summary {
        Some(summary) => {
            Log::log_decorated(&format!("About {}", result.city));
            Log::log_indented(summary);
        }
        None => Log::log_indented(&format!("No description found for {}", result.city)),
    }
}

/// Start-of-run banner: today's date and time in `home` (or local time).
pub fn print_banner(home: Option<Tz>) {
    let now = Utc::now();
    let stamp = match home {
        Some(tz) => now.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S %Z").to_string(),
        None => now.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    Log::log_decorated(&format!("Now: {}", stamp));
}
