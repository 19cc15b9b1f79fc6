//! Waypost command line
//!
//! Resolve navigation paths against a route configuration, or check that a
//! configuration loads cleanly.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{check, resolve};

#[derive(Parser)]
#[command(name = "waypost")]
#[command(about = "Waypost - guarded route redirect resolution", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve where navigating to a path ends up
    Resolve {
        /// Route configuration (TOML or JSON)
        #[arg(short, long, default_value = "routes.toml")]
        config: PathBuf,

        /// Set a navigation flag (repeatable)
        #[arg(short = 'f', long = "flag", value_name = "NAME")]
        flags: Vec<String>,

        /// Set a navigation value (repeatable)
        #[arg(
            short = 's',
            long = "set",
            value_name = "KEY=VALUE",
            value_parser = resolve::parse_key_value
        )]
        values: Vec<(String, String)>,

        /// Path being navigated to
        path: String,
    },

    /// Validate a route configuration and summarize its routes
    Check {
        /// Route configuration (TOML or JSON)
        #[arg(short, long, default_value = "routes.toml")]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let output = match cli.command {
        Commands::Resolve {
            config,
            flags,
            values,
            path,
        } => resolve::run(&config, &flags, &values, &path)?,
        Commands::Check { config } => check::run(&config)?,
    };

    println!("{output}");
    Ok(())
}
