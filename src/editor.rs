//! Interactive registry maintenance (`--manage`).
//!
//! A menu loop over a working copy of the registry. Each menu choice maps to
//! an [`EditorState`]; every state except the two exits returns to the menu.
//! Bad input (unknown choice, empty or duplicate new name, position out of range)
//! is reported and the menu is shown again; the working copy is untouched.
//!
//! Only [`EditorState::SaveAndExit`] writes to disk. Discarding, or reaching
//! end of input, hands back the registry as it was before editing.

use anyhow::Result;

use crate::logger::Log;
use crate::prompt::LineInput;
use crate::registry::{Registry, RegistryEntry, RegistryError, RegistryStore};
use crate::resolver::CityResolver;

/// One step of the editor menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Listing,
    Adding,
    Editing,
    Deleting,
    SaveAndExit,
    DiscardAndExit,
}

impl EditorState {
    /// Map a menu selection ("1"-"6") to a state.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Listing),
            "2" => Some(Self::Adding),
            "3" => Some(Self::Editing),
            "4" => Some(Self::Deleting),
            "5" => Some(Self::SaveAndExit),
            "6" => Some(Self::DiscardAndExit),
            _ => None,
        }
    }
}

/// How the editor session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    /// The working copy was written (or a write was attempted) and is now
    /// authoritative.
    Saved(Registry),
    /// Edits were thrown away; this is the registry from before editing.
    Discarded(Registry),
}

impl EditorOutcome {
    pub fn into_registry(self) -> Registry {
        match self {
            EditorOutcome::Saved(registry) | EditorOutcome::Discarded(registry) => registry,
        }
    }
}

/// Result of asking the user to pick a listed entry.
enum Selection {
    /// Input ended.
    Ended,
    /// Not a number or out of range; already reported.
    Invalid,
    /// 1-based position and a copy of the entry there.
    At(usize, RegistryEntry),
}

pub struct RegistryEditor<'a> {
    original: Registry,
    working: Registry,
    store: &'a RegistryStore,
    resolver: &'a CityResolver,
}

impl<'a> RegistryEditor<'a> {
    pub fn new(registry: Registry, store: &'a RegistryStore, resolver: &'a CityResolver) -> Self {
        Self {
            working: registry.clone(),
            original: registry,
            store,
            resolver,
        }
    }

    /// Current working copy (reflects unsaved edits).
    pub fn working(&self) -> &Registry {
        &self.working
    }

    /// Run the menu until the user saves, discards, or input ends.
    pub fn run(mut self, input: &mut dyn LineInput) -> Result<EditorOutcome> {
        loop {
            Log::log_block_start("City registry");
            Log::log_indented(
                "1) List  2) Add  3) Edit  4) Delete  5) Save and exit  6) Exit without saving",
            );

            let Some(choice) = input.read_line("Choice: ", None)? else {
                return Ok(self.discard());
            };

            let Some(state) = EditorState::from_choice(&choice) else {
                Log::log_warning(&format!("Invalid choice: {}", choice.trim()));
                continue;
            };

            let step = match state {
                EditorState::Listing => {
                    self.list();
                    Ok(true)
                }
                EditorState::Adding => self.add(input),
                EditorState::Editing => self.edit(input),
                EditorState::Deleting => self.delete(input),
                EditorState::SaveAndExit => return Ok(self.save()),
                EditorState::DiscardAndExit => return Ok(self.discard()),
            };

            // `Ok(false)` means input ended mid-step
            if !step? {
                return Ok(self.discard());
            }
        }
    }

    fn list(&self) {
        Log::log_block_start("Registered cities:");
        if self.working.is_empty() {
            Log::log_indented("(none)");
        }
        for (i, entry) in self.working.entries().iter().enumerate() {
            let timezone = if entry.timezone.is_empty() {
                "(no timezone)"
            } else {
                entry.timezone.as_str()
            };
            Log::log_indented(&format!("{}. {} -> {}", i + 1, entry.name, timezone));
        }
    }

    fn report_invalid(error: RegistryError) {
        Log::log_warning(&error.to_string());
    }

    fn add(&mut self, input: &mut dyn LineInput) -> Result<bool> {
        let Some(name) = input.read_line("City to add: ", None)? else {
            return Ok(false);
        };
        let name = name.trim().to_string();

        // Validate before asking for the timezone
        if name.is_empty() {
            Self::report_invalid(RegistryError::EmptyName);
            return Ok(true);
        }
        if self.working.contains(&name) {
            Self::report_invalid(RegistryError::Duplicate(name));
            return Ok(true);
        }

        let Some(mut timezone) =
            input.read_line("Timezone (e.g. Asia/Tokyo, blank to look it up): ", None)?
        else {
            return Ok(false);
        };
        timezone = timezone.trim().to_string();

        if timezone.is_empty() {
            match self.resolver.lookup_timezone(&name) {
                Some((found, coords)) => {
                    Log::log_decorated(&format!("Found {} at {}", found, coords));
                    timezone = found;
                }
                None => {
                    let Some(manual) =
                        input.read_line("Lookup failed. Enter a timezone: ", None)?
                    else {
                        return Ok(false);
                    };
                    timezone = manual.trim().to_string();
                }
            }
        }

        warn_if_unknown_timezone(&timezone);

        match self.working.add(&name, &timezone) {
            Ok(()) => Log::log_decorated(&format!("Added {} -> {}", name, timezone)),
            Err(e) => Self::report_invalid(e),
        }
        Ok(true)
    }

    fn read_selection(&mut self, input: &mut dyn LineInput, header: &str) -> Result<Selection> {
        Log::log_block_start(header);
        self.list();

        let Some(selection) = input.read_line("Number: ", None)? else {
            return Ok(Selection::Ended);
        };

        let Ok(position) = selection.trim().parse::<usize>() else {
            Log::log_warning(&format!("Not a number: {}", selection.trim()));
            return Ok(Selection::Invalid);
        };

        match self.working.entry_at(position) {
            Ok(entry) => Ok(Selection::At(position, entry.clone())),
            Err(e) => {
                Self::report_invalid(e);
                Ok(Selection::Invalid)
            }
        }
    }

    fn edit(&mut self, input: &mut dyn LineInput) -> Result<bool> {
        let (position, entry) = match self.read_selection(input, "Select the city to edit")? {
            Selection::Ended => return Ok(false),
            Selection::Invalid => return Ok(true),
            Selection::At(position, entry) => (position, entry),
        };

        let Some(new_name) =
            input.read_line(&format!("New name (blank keeps {}): ", entry.name), None)?
        else {
            return Ok(false);
        };
        let Some(new_timezone) = input.read_line(
            &format!("New timezone (blank keeps {}): ", entry.timezone),
            None,
        )?
        else {
            return Ok(false);
        };

        if !new_timezone.trim().is_empty() {
            warn_if_unknown_timezone(new_timezone.trim());
        }

        let new_name = new_name.trim();
        if !new_name.is_empty() && new_name != entry.name && self.working.contains(new_name) {
            Log::log_warning(&format!(
                "{} is already registered; its entry takes over from {}",
                new_name, entry.name
            ));
        }

        match self
            .working
            .update(position, Some(new_name), Some(&new_timezone))
        {
            Ok(()) => Log::log_decorated("Updated"),
            Err(e) => Self::report_invalid(e),
        }
        Ok(true)
    }

    fn delete(&mut self, input: &mut dyn LineInput) -> Result<bool> {
        let (position, entry) = match self.read_selection(input, "Select the city to delete")? {
            Selection::Ended => return Ok(false),
            Selection::Invalid => return Ok(true),
            Selection::At(position, entry) => (position, entry),
        };
        let name = entry.name;

        let Some(answer) = input.read_line(&format!("Delete {}? (y/n): ", name), None)? else {
            return Ok(false);
        };

        if is_affirmative(&answer) {
            match self.working.remove_at(position) {
                Ok(entry) => Log::log_decorated(&format!("Deleted {}", entry.name)),
                Err(e) => Self::report_invalid(e),
            }
        } else {
            Log::log_decorated("Kept");
        }
        Ok(true)
    }

    fn save(self) -> EditorOutcome {
        match self.store.save(&self.working) {
            Ok(()) => Log::log_info(&format!(
                "Saved {} cities to {}",
                self.working.len(),
                crate::utils::path_for_display(self.store.path())
            )),
            Err(e) => {
                Log::log_warning(&format!("Could not save the registry: {:#}", e));
                Log::log_indented("Changes are kept for this session only");
            }
        }
        EditorOutcome::Saved(self.working)
    }

    fn discard(self) -> EditorOutcome {
        if self.working != self.original {
            Log::log_decorated("Exiting without saving; changes discarded");
        } else {
            Log::log_decorated("Exiting without saving");
        }
        EditorOutcome::Discarded(self.original)
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn warn_if_unknown_timezone(timezone: &str) {
    if !timezone.is_empty() && timezone.parse::<chrono_tz::Tz>().is_err() {
        Log::log_warning(&format!(
            "{} is not a known timezone; local time will not be shown for it",
            timezone
        ));
    }
}
