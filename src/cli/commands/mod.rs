//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`]. Running the binary with
//! no subcommand starts the deploy wizard.

pub mod analyze;
pub mod chat;
pub mod completions;
pub mod deploy;
pub mod dispatcher;
pub mod doctor;
pub mod generate;
pub mod serve;
pub mod sites;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
