//! Top-level command handlers for cityclock.
//!
//! `lookup` is the default interactive loop; `manage` runs the registry
//! editor. Both load configuration and the registry themselves so `main`
//! only has to dispatch on the parsed [`crate::args::CliAction`].

pub mod lookup;
pub mod manage;

pub use lookup::{handle_lookup_command, run_lookup_loop};
pub use manage::handle_manage_command;
