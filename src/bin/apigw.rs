//! apigw CLI Binary
//!
//! Command-line client for managing API gateway endpoints. The only place that writes a
//! failed command's message to stderr and chooses the process exit code.

use apigw::cli::{command_name, render_error, Cli, RunContext};
use apigw::config::ConfigLoader;
use apigw::error::ComposedError;
use apigw::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(e.exit_code().code());
    }

    let command = command_name(&cli.command);
    info!(command, "apigw starting");

    let context = match RunContext::new(cli.config.as_deref(), &cli.overrides()) {
        Ok(ctx) => ctx,
        Err(e) => fail(&e, command, !cli.no_color),
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!(command, "Command completed successfully");
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => fail(&e, command, context.config().output.color),
    }
}

/// Log the full cause chain, print what the error's flags allow, and exit.
fn fail(e: &ComposedError, command: &str, color: bool) -> ! {
    for (depth, cause) in e.chain().enumerate() {
        error!(command, depth, cause = %cause, "Command failed");
    }
    let rendered = render_error(e, command, color);
    if !rendered.is_empty() {
        eprintln!("{}", rendered);
    }
    process::exit(e.exit_code().code());
}

/// Build logging configuration from CLI args, environment, and config file
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    if !cli.verbose && !cli.debug && cli.log_level.is_none() {
        return LoggingConfig {
            level: "off".to_string(),
            ..LoggingConfig::default()
        };
    }

    let mut config = ConfigLoader::load(cli.config.as_deref())
        .ok()
        .map(|c| c.logging)
        .unwrap_or_default();

    // Override with CLI arguments (highest priority)
    config.level = match (&cli.log_level, cli.debug) {
        (Some(level), _) => level.clone(),
        (None, true) => "debug".to_string(),
        (None, false) => "info".to_string(),
    };
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }
    if cli.no_color {
        config.color = false;
    }

    config
}
