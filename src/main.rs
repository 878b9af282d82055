use anyhow::Result;

use cityclock::args::{CliAction, ParsedArgs, display_help, display_version_info};
use cityclock::commands::{handle_lookup_command, handle_manage_command};
use cityclock::constants::EXIT_FAILURE;
use cityclock::logger::Log;

fn main() -> Result<()> {
    let parsed = ParsedArgs::from_env();

    match parsed.action {
        CliAction::ShowVersion => {
            display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Manage { debug_enabled } => {
            Log::set_debug(debug_enabled);
            run_or_report(handle_manage_command(debug_enabled))
        }
        CliAction::Lookup {
            debug_enabled,
            city,
        } => {
            Log::set_debug(debug_enabled);
            run_or_report(handle_lookup_command(debug_enabled, city))
        }
    }
}

/// Print a fatal error in the log style and exit non-zero.
fn run_or_report(result: Result<()>) -> Result<()> {
    if let Err(e) = result {
        Log::log_pipe();
        Log::log_error(&format!("{:#}", e));
        Log::log_end();
        std::process::exit(EXIT_FAILURE);
    }
    Ok(())
}
