//! Metroroute CLI library.
//!
//! Subcommand handlers, output formatting and terminal styling for the
//! `metroroute` binary.

pub mod commands;
pub mod output;
pub mod terminal;
