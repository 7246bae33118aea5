//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Netlify AI - analyse a project, generate its Netlify config and deploy it.
#[derive(Debug, Parser)]
#[command(name = "netlify-ai")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides ~/.netlify-ai/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Never prompt; use defaults and NETLIFY_AI_PROMPT_* overrides
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Project folder to deploy (same as `deploy PATH`)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Extra positional arguments are accepted and ignored
    #[arg(hide = true)]
    pub extra: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the deploy wizard (default if no command specified)
    Deploy(DeployArgs),

    /// Analyse a project and print what was detected
    Analyze(AnalyzeArgs),

    /// Write netlify.toml and companion files without deploying
    Generate(GenerateArgs),

    /// Start the local web studio
    Serve(ServeArgs),

    /// Ask the AI assistant a deployment question
    Chat(ChatArgs),

    /// Check that the netlify CLI and Node.js are available
    Doctor,

    /// List your Netlify sites
    Sites,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `deploy` command.
#[derive(Debug, Clone, Default, Args)]
pub struct DeployArgs {
    /// Project folder (asked interactively when omitted)
    pub path: Option<PathBuf>,
}

/// Arguments for the `analyze` command.
#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Project folder
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            json: false,
        }
    }
}

/// Arguments for the `generate` command.
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Project folder
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Directory Netlify publishes
    #[arg(long)]
    pub publish_dir: Option<String>,

    /// Directory holding serverless functions
    #[arg(long)]
    pub functions_dir: Option<String>,

    /// Build command (empty for none)
    #[arg(long)]
    pub build_command: Option<String>,

    /// Python runtime version for functions
    #[arg(long)]
    pub python_version: Option<String>,

    /// Do not write .gitignore
    #[arg(long)]
    pub no_gitignore: bool,

    /// Do not write .env.example
    #[arg(long)]
    pub no_env_example: bool,

    /// Do not write requirements.txt
    #[arg(long)]
    pub no_requirements: bool,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            publish_dir: None,
            functions_dir: None,
            build_command: None,
            python_version: None,
            no_gitignore: false,
            no_env_example: false,
            no_requirements: false,
            force: false,
        }
    }
}

/// Arguments for the `serve` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Address to bind (default from settings, 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (default from settings, 5886)
    #[arg(long, env = "NETLIFY_AI_PORT")]
    pub port: Option<u16>,

    /// Do not open a browser
    #[arg(long)]
    pub no_browser: bool,
}

/// Arguments for the `chat` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ChatArgs {
    /// openai, anthropic or google (default from settings)
    #[arg(long)]
    pub provider: Option<String>,

    /// API key (default: provider environment variable, then settings)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Project folder to describe to the assistant
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// The question
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
