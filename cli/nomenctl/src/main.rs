//! nomen - CLI for structured names
//!
//! Parses, formats and renames names through the codecs in `nomen-codec`.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

use commands::Cli;
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);
    cli.run(&config)
}

fn init_tracing(config: &Config) {
    // Prefer RUST_LOG, fall back to NOMEN_LOG_LEVEL. Logs go to stderr so
    // stdout stays clean for names and JSON.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into());

    let (json, plain) = if config.log_json {
        (
            Some(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
            None,
        )
    } else {
        (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .init();
}
