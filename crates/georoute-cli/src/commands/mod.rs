// Module exports for CLI subcommands.
//
// Each module handles one subcommand; main.rs parses arguments, loads the
// dataset once and dispatches to these handlers.

pub mod compare;
pub mod dataset;
pub mod info;
pub mod lookup;
pub mod route;
