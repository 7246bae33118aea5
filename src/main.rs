//! `netlify-ai` binary.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use netlify_ai::cli::{Cli, CommandDispatcher, CommandResult};
use netlify_ai::config::load_settings;
use netlify_ai::shell::{is_ci, SystemRunner};
use netlify_ai::ui::{create_ui, OutputMode, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `--debug` wins over `RUST_LOG`; otherwise info for this crate only.
fn init_tracing(debug: bool) {
    let filter = match debug {
        true => EnvFilter::new("netlify_ai=debug"),
        false => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("netlify_ai=info")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli, ui: &mut dyn UserInterface) -> netlify_ai::Result<CommandResult> {
    let settings = load_settings(cli.config.as_deref())?;
    tracing::debug!(provider = %settings.ai.provider, port = settings.server.port, "settings loaded");
    CommandDispatcher::new(settings, Arc::new(SystemRunner)).dispatch(cli, ui)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    tracing::debug!(?cli, "parsed arguments");

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let interactive = !cli.non_interactive && !is_ci();
    let mut ui = create_ui(interactive, OutputMode::from_flags(cli.verbose, cli.quiet));

    match run(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1)),
        Err(e) => {
            ui.error(&format!("Error: {e}"));
            ExitCode::FAILURE
        }
    }
}
