//! Command-line argument parsing and processing.
//!
//! Options are matched by hand; every non-option argument is part of the
//! initial city name, so `cityclock New York` looks up "New York".

use crate::logger::Log;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Report on cities, starting with `city` when one was given
    Lookup {
        debug_enabled: bool,
        city: Option<String>,
    },
    /// Run the interactive registry editor
    Manage { debug_enabled: bool },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments (including the program name) into an action.
    ///
    /// Version wins over help, help over `--manage`. Any unknown option
    /// turns the whole invocation into [`CliAction::ShowHelpDueToError`].
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut run_manage = false;
        let mut unknown_arg_found = false;
        let mut city_words: Vec<String> = Vec::new();

        for arg in args.into_iter().skip(1) {
            let arg_str = arg.as_ref();
            match arg_str {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--manage" | "-m" => run_manage = true,
                _ if arg_str.starts_with('-') && arg_str.len() > 1 => {
                    Log::log_warning(&format!("Unknown option: {}", arg_str));
                    unknown_arg_found = true;
                }
                _ => city_words.push(arg_str.to_string()),
            }
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else if display_help {
            CliAction::ShowHelp
        } else if run_manage {
            CliAction::Manage { debug_enabled }
        } else {
            let city = city_words.join(" ");
            let city = city.trim();
            CliAction::Lookup {
                debug_enabled,
                city: (!city.is_empty()).then(|| city.to_string()),
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    Log::log_version();
    Log::log_pipe();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    Log::log_version();
    Log::log_block_start(env!("CARGO_PKG_DESCRIPTION"));
    Log::log_block_start("Usage: cityclock [OPTIONS] [CITY ...]");
    Log::log_block_start("Options:");
    Log::log_indented("-d, --debug      Enable detailed debug output");
    Log::log_indented("-m, --manage     Edit the city registry interactively");
    Log::log_indented("-h, --help       Print help information");
    Log::log_indented("-V, --version    Print version information");
    Log::log_block_start("Without --manage, the words after the options form the first city.");
    Log::log_indented("Further cities are read from the prompt; an empty line quits.");
    Log::log_end();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(debug_enabled: bool, city: Option<&str>) -> CliAction {
        CliAction::Lookup {
            debug_enabled,
            city: city.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_no_args() {
        let parsed = ParsedArgs::parse(vec!["cityclock"]);
        assert_eq!(parsed.action, lookup(false, None));
    }

    #[test]
    fn test_parse_debug_flags() {
        let parsed = ParsedArgs::parse(vec!["cityclock", "--debug"]);
        assert_eq!(parsed.action, lookup(true, None));

        let parsed = ParsedArgs::parse(vec!["cityclock", "-d"]);
        assert_eq!(parsed.action, lookup(true, None));
    }

    #[test]
    fn test_city_words_are_joined() {
        let parsed = ParsedArgs::parse(vec!["cityclock", "New", "York"]);
        assert_eq!(parsed.action, lookup(false, Some("New York")));
    }

    #[test]
    fn test_debug_between_city_words() {
        let parsed = ParsedArgs::parse(vec!["cityclock", "Rio", "-d", "de", "Janeiro"]);
        assert_eq!(parsed.action, lookup(true, Some("Rio de Janeiro")));
    }

    #[test]
    fn test_lone_dash_is_a_city_word() {
        let parsed = ParsedArgs::parse(vec!["cityclock", "-"]);
        assert_eq!(parsed.action, lookup(false, Some("-")));
    }

    #[test]
    fn test_blank_city_is_none() {
        let parsed = ParsedArgs::parse(vec!["cityclock", "  "]);
        assert_eq!(parsed.action, lookup(false, None));
    }

    #[test]
    fn test_parse_manage_flags() {
        let parsed = ParsedArgs::parse(vec!["cityclock", "--manage"]);
        assert_eq!(
            parsed.action,
            CliAction::Manage {
                debug_enabled: false
            }
        );

        let parsed = ParsedArgs::parse(vec!["cityclock", "-d", "-m", "Tokyo"]);
        assert_eq!(
            parsed.action,
            CliAction::Manage {
                debug_enabled: true
            }
        );
    }

    #[test]
    fn test_parse_help_flags() {
        assert_eq!(
            ParsedArgs::parse(vec!["cityclock", "--help"]).action,
            CliAction::ShowHelp
        );
        assert_eq!(
            ParsedArgs::parse(vec!["cityclock", "-h"]).action,
            CliAction::ShowHelp
        );
    }

    #[test]
    fn test_parse_version_short_flags() {
        assert_eq!(
            ParsedArgs::parse(vec!["cityclock", "-V"]).action,
            CliAction::ShowVersion
        );
        assert_eq!(
            ParsedArgs::parse(vec!["cityclock", "-v"]).action,
            CliAction::ShowVersion
        );
    }

    #[test]
    fn test_help_takes_precedence_over_manage() {
        let parsed = ParsedArgs::parse(vec!["cityclock", "--manage", "--help"]);
        assert_eq!(parsed.action, CliAction::ShowHelp);
    }

    #[test]
    fn test_version_takes_precedence() {
        let parsed = ParsedArgs::parse(vec!["cityclock", "--version", "--help", "--manage"]);
        assert_eq!(parsed.action, CliAction::ShowVersion);
    }

    #[test]
    fn test_parse_unknown_flag() {
        let parsed = ParsedArgs::parse(vec!["cityclock", "--unknown"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);

        let parsed = ParsedArgs::parse(vec!["cityclock", "--debug", "Oslo", "-x"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }
}
