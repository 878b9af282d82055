//! Persistent registry of named cities and their timezones.
//!
//! The registry is an ordered mapping from city name to IANA timezone id.
//! An empty timezone string marks a city that is known but has no timezone.
//! Order matters: the editor addresses entries by their 1-based position in
//! listing order, which is the order of the keys in the JSON file.
//!
//! [`RegistryStore`] owns the on-disk side. Loading never fails (defaults are
//! substituted); saving reports failures to the caller, who decides whether
//! to surface them.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_CITIES;
use crate::logger::Log;

/// Rejected registry edits. These are user-input errors and are always
/// recoverable by asking again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("City name must not be empty")]
    EmptyName,
    #[error("{0} is already registered")]
    Duplicate(String),
    #[error("No entry at position {position} (registry has {len})")]
    OutOfRange { position: usize, len: usize },
}

/// One registry row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub name: String,
    pub timezone: String,
}

/// Ordered city → timezone mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in set used when no registry file can be read.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (name, timezone) in DEFAULT_CITIES {
            registry.entries.push(RegistryEntry {
                name: name.to_string(),
                timezone: timezone.to_string(),
            });
        }
        registry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact-match lookup. `Some("")` means "known city, no timezone".
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.timezone.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Entry at a 1-based listing position.
    pub fn entry_at(&self, position: usize) -> Result<&RegistryEntry, RegistryError> {
        self.index_of_position(position).map(|index| &self.entries[index])
    }

    /// Append a new city. Names are trimmed; empty or already registered
    /// names are rejected.
    pub fn add(&mut self, name: &str, timezone: &str) -> Result<(), RegistryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.contains(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }

        self.entries.push(RegistryEntry {
            name: name.to_string(),
            timezone: timezone.trim().to_string(),
        });
        Ok(())
    }

    /// Rename and/or retime the entry at a 1-based position.
    ///
    /// `None` (or a blank string) for either field keeps the current value.
    /// A rename removes the old key; the entry keeps its listing position.
    /// Renaming onto another registered city overwrites that city's timezone
    /// in place and drops the renamed entry.
    pub fn update(
        &mut self,
        position: usize,
        new_name: Option<&str>,
        new_timezone: Option<&str>,
    ) -> Result<(), RegistryError> {
        let index = self.index_of_position(position)?;

        let new_name = new_name.map(str::trim).filter(|name| !name.is_empty());
        let timezone = new_timezone
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.entries[index].timezone.clone());

        let target = match new_name {
            Some(name) if name != self.entries[index].name => {
                match self.entries.iter().position(|entry| entry.name == name) {
                    Some(existing) => {
                        self.entries[existing].timezone = timezone;
                        self.entries.remove(index);
                        return Ok(());
                    }
                    None => Some(name),
                }
            }
            _ => None,
        };

        let entry = &mut self.entries[index];
        if let Some(name) = target {
            entry.name = name.to_string();
        }
        entry.timezone = timezone;
        Ok(())
    }

    /// Remove and return the entry at a 1-based position.
    pub fn remove_at(&mut self, position: usize) -> Result<RegistryEntry, RegistryError> {
        let index = self.index_of_position(position)?;
        Ok(self.entries.remove(index))
    }

    fn index_of_position(&self, position: usize) -> Result<usize, RegistryError> {
        if position == 0 || position > self.entries.len() {
            return Err(RegistryError::OutOfRange {
                position,
                len: self.entries.len(),
            });
        }
        Ok(position - 1)
    }

    /// Build a registry from a parsed JSON value.
    ///
    /// Returns `None` unless the value is an object. Empty keys are dropped
    /// and non-string values become an empty timezone.
    pub fn from_json(value: Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };

        let entries = map
            .into_iter()
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| RegistryEntry {
                name,
                timezone: match value {
                    Value::String(tz) => tz,
                    _ => String::new(),
                },
            })
            .collect();

        Some(Self { entries })
    }

    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|entry| (entry.name.clone(), Value::String(entry.timezone.clone())))
            .collect();
        Value::Object(map)
    }
}

/// File-backed persistence for the registry.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the registry file, falling back to the built-in defaults when the
    /// file is missing, unreadable, not JSON, or not a JSON object.
    pub fn load(&self) -> Registry {
        match self.try_load() {
            Ok(registry) => registry,
            Err(e) => {
                Log::log_debug(&format!("Using default cities: {:#}", e));
                Registry::with_defaults()
            }
        }
    }

    fn try_load(&self) -> Result<Registry> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Registry::from_json(value)
            .with_context(|| format!("{} does not hold a JSON object", self.path.display()))
    }

    /// Write the registry as indented UTF-8 JSON, creating the parent
    /// directory if needed. Non-ASCII names are written verbatim.
    pub fn save(&self, registry: &Registry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory {}", parent.display())
                })?;
            }
        }

        let mut content = serde_json::to_string_pretty(&registry.to_json())
            .context("Failed to serialize registry")?;
        content.push('\n');

        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}
