//! kspackages - command line entry point
//!
//! Logs go to stderr; stdout carries only the requested output.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use kspackages::cli::{Cli, Commands};
use kspackages::{PayloadConfig, PayloadModule, parse, serialize};

/// Initialize the logger with appropriate settings
fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "kspackages=debug"
    } else {
        "kspackages=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse_args();
    init_logger(cli.verbose);
    debug!("CLI arguments parsed");

    if let Err(e) = run(cli.command) {
        error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Normalize { input, output } => {
            let text = read_section(&input)?;
            let selection = parse(&text).with_context(|| format!("Failed to parse {:?}", input))?;
            let canonical = serialize(&selection);

            match output {
                Some(path) => {
                    fs::write(&path, &canonical)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    info!("Canonical section written to {:?}", path);
                }
                None => print!("{}", canonical),
            }
        }
        Commands::Validate { input } => {
            let text = read_section(&input)?;
            let selection = parse(&text).with_context(|| format!("Failed to parse {:?}", input))?;
            info!(
                included = selection.included().count(),
                "Packages section is valid"
            );
            println!("✓ Packages section is valid: {:?}", input);
        }
        Commands::Handler { config } => {
            let config = match config {
                Some(path) => PayloadConfig::load_from_file(&path)?,
                None => PayloadConfig::default(),
            };
            let mut module = PayloadModule::new().with_config(config);
            let path = module.create_default_handler()?;
            println!("{}", path);
        }
    }

    Ok(())
}

fn read_section(path: &Path) -> Result<String> {
    debug!("Reading {:?}", path);
    fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}
