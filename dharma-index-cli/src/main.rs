//! Dharma Index CLI - Builds the video index page
//!
//! Reads the catalog and template from the site directory and writes the
//! finished page next to them.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dharma_index_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "dharma-index")]
#[command(about = "Builds the Dharma video index page from its catalog and template")]
#[command(version)]
struct Cli {
    /// Directory holding the catalog, template and generated page
    /// [default: directory of this executable]
    #[arg(long)]
    site_dir: Option<PathBuf>,

    /// Console diagnostics level (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value_t = CliLogLevel::Warn)]
    log_level: CliLogLevel,

    /// Also write trace-level logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), cli.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    commands::run_build(cli.site_dir)
}
