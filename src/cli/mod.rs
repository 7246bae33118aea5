//! Command-line interface for netlify-ai.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    AnalyzeArgs, ChatArgs, Cli, Commands, CompletionsArgs, DeployArgs, GenerateArgs, ServeArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
