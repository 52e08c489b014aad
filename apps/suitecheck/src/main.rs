//! suitecheck - Consistency checker for compiled test suite distributions
//!
//! Resolves the suite layout from flags, environment and config file, runs
//! the requested check on a blocking task, and renders the outcome.

mod cli;
mod display;
mod error;
mod events;

use crate::cli::{Cli, Commands};
use crate::display::{CommandOutput, OutputRenderer};
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use std::process;
use suitecheck_config::Config;
use suitecheck_events::EventReceiver;
use suitecheck_guard::SuiteVerifier;
use suitecheck_types::{ColorChoice, OutputFormat};
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Resolve config before tracing so the output format from the file or
    // environment also decides how logs and errors are written.
    let config = load_config(&cli.global).await;
    let json_mode = match &config {
        Ok(config) => config.general.default_output == OutputFormat::Json,
        Err(_) => cli.global.json,
    };

    init_tracing(json_mode, cli.global.debug);

    match run(cli, config).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Application error: {}", e);
            if json_mode {
                if let Err(render_err) = OutputRenderer::render_json_error(e.code(), &e.to_string())
                {
                    eprintln!("Error: {render_err}");
                }
            } else {
                eprintln!("Error: {e}");
            }
            process::exit(1);
        }
    }
}

/// Load and merge configuration
///
/// Precedence: defaults < file < environment < CLI flags
async fn load_config(global: &cli::GlobalArgs) -> Result<Config, CliError> {
    let mut config = Config::load_or_default(global.config.as_deref()).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, global);
    config.validate()?;
    Ok(config)
}

/// Main application logic
///
/// Returns `Ok(false)` when the check ran to completion but did not pass.
async fn run(cli: Cli, config: Result<Config, CliError>) -> Result<bool, CliError> {
    info!("Starting suitecheck v{}", env!("CARGO_PKG_VERSION"));

    let config = config?;
    let json_output = config.general.default_output == OutputFormat::Json;
    let renderer = OutputRenderer::new(json_output, config.general.color);

    let colors_enabled = match config.general.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };
    let mut event_handler = EventHandler::new(colors_enabled, cli.global.debug);

    let (event_sender, event_receiver) = suitecheck_events::channel();
    let verifier = SuiteVerifier::from_config(&config)?.with_event_sender(event_sender);
    info!(
        suite = %verifier.layout().suite_dir.display(),
        "resolved suite layout"
    );

    let output =
        execute_command_with_events(cli.command, verifier, event_receiver, &mut event_handler)
            .await?;
    tracing::debug!(events = event_handler.handled(), "command finished");

    renderer.render(&output)?;

    if let CommandOutput::Verify(report) = &output {
        if !report.passed {
            error!(missing = report.missing.len(), "suite verification failed");
            return Ok(false);
        }
    }

    info!("Command completed successfully");
    Ok(true)
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: Commands,
    verifier: SuiteVerifier,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<CommandOutput, CliError> {
    let mut command_task =
        tokio::task::spawn_blocking(move || execute_command(&command, &verifier));

    loop {
        select! {
            result = &mut command_task => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result?;
            }

            event = event_receiver.recv() => {
                match event {
                    Some(event) => event_handler.handle_event(event),
                    // Every sender is gone; only the task result is left.
                    None => break,
                }
            }
        }
    }

    command_task.await?
}

/// Execute the specified command
fn execute_command(
    command: &Commands,
    verifier: &SuiteVerifier,
) -> Result<CommandOutput, CliError> {
    match command {
        Commands::Verify => Ok(CommandOutput::Verify(verifier.verify()?)),
        Commands::Info => {
            let info = verifier.check_suite_info()?;
            Ok(CommandOutput::Info {
                layout: verifier.layout().clone(),
                info,
            })
        }
        Commands::Modules => Ok(CommandOutput::Modules(verifier.list_modules()?)),
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if json_mode && !debug_enabled {
        // JSON mode: suppress console output to avoid contaminating JSON
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else if json_mode {
        // JSON with debug: structured logs on stderr, stdout stays clean
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(
                        "info,suitecheck=debug,suitecheck_guard=debug",
                    )
                }),
            )
            .init();
    } else if debug_enabled {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(
                        "info,suitecheck=debug,suitecheck_guard=debug",
                    )
                }),
            )
            .init();
    } else {
        // Normal mode: warnings only
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &cli::GlobalArgs) {
    if let Some(root) = &global.root {
        config.suite.root = Some(root.clone());
    }
    if let Some(color) = &global.color {
        config.general.color = *color;
    }
    if global.json {
        config.general.default_output = OutputFormat::Json;
    }
}
