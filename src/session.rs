//! Per-run session state: the working registry and the city-name history.
//!
//! The session is owned by the top-level loop and passed explicitly to the
//! lookup and editor entry points. It is also the data source for input
//! completion.

use crate::registry::Registry;

/// Recently entered city names, most recent first, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityHistory {
    names: Vec<String>,
    limit: usize,
}

impl CityHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            names: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Move `name` to the front, dropping the oldest names past the limit.
    pub fn push(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        self.names.retain(|existing| existing != name);
        self.names.insert(0, name.to_string());
        self.names.truncate(self.limit);
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Mutable state that lives for one run of the program.
#[derive(Debug, Clone)]
pub struct Session {
    pub registry: Registry,
    pub history: CityHistory,
}

impl Session {
    pub fn new(registry: Registry, history_limit: usize) -> Self {
        Self {
            registry,
            history: CityHistory::new(history_limit),
        }
    }

    /// Completion candidates for `prefix`: registered names in listing order,
    /// then history, with duplicates removed.
    pub fn completion_candidates(&self, prefix: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();

        let names = self
            .registry
            .names()
            .chain(self.history.names().iter().map(String::as_str));

        for name in names {
            if name.starts_with(prefix) && !candidates.iter().any(|c| c == name) {
                candidates.push(name.to_string());
            }
        }

        candidates
    }
}
