//! Implementation of the --manage command.

use anyhow::Result;

use crate::config::Config;
use crate::editor::{EditorOutcome, RegistryEditor};
use crate::logger::Log;
use crate::prompt::stdin_input;
use crate::registry::RegistryStore;
use crate::resolver::CityResolver;
use crate::utils::path_for_display;

/// Open the registry editor on the configured registry file.
pub fn handle_manage_command(debug_enabled: bool) -> Result<()> {
    Log::log_version();

    let config = Config::load()?;
    if debug_enabled {
        config.log_config();
    }

    let store = RegistryStore::new(config.registry_path()?);
    Log::log_block_start(&format!(
        "Editing {}",
        path_for_display(store.path())
    ));

    let resolver = CityResolver::from_config(&config)?;
    let editor = RegistryEditor::new(store.load(), &store, &resolver);

    let mut input = stdin_input();
    match editor.run(input.as_mut())? {
        EditorOutcome::Saved(registry) => {
            Log::log_debug(&format!("Registry now has {} cities", registry.len()))
        }
        EditorOutcome::Discarded(_) => Log::log_debug("Registry left unchanged"),
    }

    Log::log_end();
    Ok(())
}
