use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kspackages - packages section normalizer
#[derive(Parser, Debug)]
#[command(name = "kspackages")]
#[command(about = "Parse, validate and canonicalize kickstart %packages sections")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a packages section and print its canonical form
    Normalize {
        /// Kickstart file holding the section
        input: PathBuf,

        /// Write the result to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check that a packages section parses
    Validate {
        /// Kickstart file holding the section
        input: PathBuf,
    },
    /// Show which payload handler the configuration selects
    Handler {
        /// Path to the payload configuration file (defaults to DNF)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
