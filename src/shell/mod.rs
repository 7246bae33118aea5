//! External process execution.

pub mod command;
pub mod platform;

pub use command::{
    execute, CommandOutput, CommandRunner, CommandSpec, StdioMode, SystemRunner,
};
pub use platform::{browser_command, is_ci, open_browser, program_name};
