//! Georoute CLI library.
//!
//! Terminal styling and output formatting shared by the `georoute-cli`
//! subcommands.

pub mod output;
pub mod terminal;
