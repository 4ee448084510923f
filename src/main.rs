//! Stegim - hide files inside images
//!
//! A CLI tool that hides a file in the least significant bits of a
//! 24-bit BMP or PNG image and extracts it again.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::{CapacityCommand, CommandExecutor, ExtractCommand, HideCommand};
use stegim::config::Config;
use stegim::error::{EXIT_OTHER, EXIT_SUCCESS, EXIT_USAGE};
use stegim::StegimError;

/// Stegim - hide files inside images
///
/// Payloads are LZW-compressed and written one bit per pixel into the
/// blue channel, protected by a watermark and a CRC32 checksum.
#[derive(Parser)]
#[command(name = "stegim")]
#[command(version)]
#[command(about = "Hide files in the least significant bits of BMP and PNG images")]
#[command(long_about = None)]
struct Cli {
    /// Show progress logs (honours RUST_LOG)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logs
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (default: ~/.stegim/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a file in an image
    Hide(HideCommand),

    /// Extract a hidden file from an image
    Extract(ExtractCommand),

    /// Show how much an image can hold
    Capacity(CapacityCommand),
}

impl Commands {
    fn executor(&self) -> &dyn CommandExecutor {
        match self {
            Commands::Hide(cmd) => cmd,
            Commands::Extract(cmd) => cmd,
            Commands::Capacity(cmd) => cmd,
        }
    }
}

fn init_tracing(cli: &Cli, config: &Config) {
    //   --quiet   → "off"
    //   --verbose → RUST_LOG if set, otherwise "info"
    //   default   → log_level from the config file, otherwise "warn"
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new(config.log_level.as_deref().unwrap_or("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Maps an error to the process exit status.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<StegimError>())
        .map_or(EXIT_OTHER, StegimError::exit_code)
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS };
            let _ = e.print();
            process::exit(code);
        }
    };

    let config = match Config::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_USAGE);
        }
    };

    init_tracing(&cli, &config);

    if let Err(err) = cli.command.executor().execute(&config) {
        eprintln!("Error: {:#}", err);
        process::exit(exit_code(&err));
    }
}
