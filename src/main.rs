mod config;
mod error;
mod filesystem;
mod format;
mod generator;
mod page;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use crate::config::Config;

/// Generate a static HTML download page from a directory of files.
#[derive(Debug, Parser)]
#[command(name = "dlpage", version, about)]
struct Cli {
    /// Config file (TOML). Defaults to the per-user config if present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to scan, overriding the config.
    #[arg(long)]
    scan_dir: Option<PathBuf>,

    /// Output HTML path, overriding the config.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the effective config as TOML and exit.
    #[arg(long)]
    print_config: bool,

    /// Log every discovered file.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("failed to generate download page: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("loading config")?;
    if let Some(scan_dir) = cli.scan_dir {
        config.scan_dir = scan_dir;
    }
    if let Some(output) = cli.output {
        config.output_html = output;
    }

    if cli.print_config {
        print!("{}", config.to_toml().context("serializing config")?);
        return Ok(());
    }

    let summary = generator::run(&config)?;
    tracing::info!(
        files = summary.file_count,
        output = %summary.output.display(),
        "done"
    );
    Ok(())
}
