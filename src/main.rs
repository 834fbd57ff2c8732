//! figexport - export every open figure to a print-readable PDF.

use anyhow::{Context, Result};
use clap::Parser;
use figexport::{export_open_figures, ExportOptions, Session};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "figexport")]
#[command(about = "Export open figures to print-readable vector PDF files", long_about = None)]
struct Args {
    /// Session file (JSON) describing the open figures
    session: Option<PathBuf>,

    /// Output directory [default: Figures]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use the print renderer instead of the vector renderer
    #[arg(long)]
    print_fallback: bool,

    /// Write log output to the specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(args: &Args) -> Result<()> {
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let mut session = match &args.session {
        Some(path) => Session::load(path)
            .with_context(|| format!("Failed to load session {}", path.display()))?,
        None => Session::new(),
    };

    let options = ExportOptions {
        output_dir: args.output.clone(),
        force_print: args.print_fallback,
    };

    let report = export_open_figures(&mut session, &options)?;
    tracing::debug!(
        "{} exported, {} failed, output in {}",
        report.exported.len(),
        report.failed.len(),
        report.output_dir.display()
    );

    Ok(())
}
