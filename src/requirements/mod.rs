//! External tool requirements.
//!
//! Before handing work to another program, the assistant probes that the
//! program can actually run. See [`probe::check`].

pub mod probe;

pub use probe::{
    check, parse_system_path, resolve_tool_path, Requirement, RequirementStatus, NETLIFY_CLI, NODE,
};
