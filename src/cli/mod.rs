//! Command-line interface for alias-sieve
//!
//! Provides `sync` and `compile` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod compile;
mod sync;

/// Sync SimpleLogin aliases with IMAP folders and compile Sieve delivery rules
#[derive(Parser)]
#[command(name = "alias-sieve")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch aliases, reconcile assignments, and regenerate the Sieve script
    Sync(sync::SyncArgs),

    /// Regenerate the Sieve script from the persisted store only
    Compile(compile::CompileArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Sync(args) => sync::run(args),
        Commands::Compile(args) => compile::run(args),
    }
}
