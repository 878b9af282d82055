//! The default command: report on cities until the user stops.

use anyhow::Result;

use crate::config::Config;
use crate::logger::Log;
use crate::prompt::{Completer, LineInput, stdin_input};
use crate::registry::RegistryStore;
use crate::report::{print_banner, print_report};
use crate::resolver::CityResolver;
use crate::session::Session;

const CITY_PROMPT: &str = "City (Tab to complete, Enter to quit): ";

/// Load configuration and the registry, then run the lookup loop on stdin.
pub fn handle_lookup_command(debug_enabled: bool, initial_city: Option<String>) -> Result<()> {
    Log::log_version();

    let config = Config::load()?;
    if debug_enabled {
        config.log_config();
    }

    let store = RegistryStore::new(config.registry_path()?);
    let mut session = Session::new(store.load(), config.history_limit());
    let resolver = CityResolver::from_config(&config)?;

    print_banner(config.home_timezone());

    let mut input = stdin_input();
    run_lookup_loop(
        &mut session,
        &resolver,
        input.as_mut(),
        initial_city.as_deref(),
    )?;

    Log::log_end();
    Ok(())
}

/// Report on `initial_city` (if any), then keep prompting.
///
/// Ends on an empty line or end of input. Every processed name is pushed
/// onto the session history, which also feeds Tab completion.
pub fn run_lookup_loop(
    session: &mut Session,
    resolver: &CityResolver,
    input: &mut dyn LineInput,
    initial_city: Option<&str>,
) -> Result<()> {
    if let Some(city) = initial_city.map(str::trim).filter(|c| !c.is_empty()) {
        report_city(session, resolver, city);
    }

    loop {
        let line = {
            let candidates = |prefix: &str| session.completion_candidates(prefix);
            let completer: Completer<'_> = &candidates;
            input.read_line(CITY_PROMPT, Some(completer))?
        };

        let city = match line.as_deref().map(str::trim) {
            None | Some("") => break,
            Some(city) => city.to_string(),
        };

        report_city(session, resolver, &city);
    }

    Ok(())
}

fn report_city(session: &mut Session, resolver: &CityResolver, city: &str) {
    let result = resolver.resolve_city(city, &session.registry);
    print_report(&result, &session.registry);
    session.history.push(city);
}
