//! Netlify CLI integration.
//!
//! - [`client`] - [`NetlifyCli`], one method per `netlify` subcommand used
//! - [`output`] - Parsers for the CLI's human and JSON output

pub mod client;
pub mod output;

pub use client::{CliOutcome, DeployKind, DeployOutcome, NetlifyCli, NETLIFY_PROGRAM};
pub use output::{extract_deploy_url, parse_sites, parse_teams, Site, Team};

