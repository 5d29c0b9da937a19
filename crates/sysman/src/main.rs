//! sysman CLI - Manual compiler.
//!
//! Provides commands for:
//! - `build`: Render a directory of manual pages plus the table of contents
//! - `page`: Render a single manual page
//! - `index`: Write the table of contents for a list of page files

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, IndexArgs, PageArgs};
use output::Output;

/// sysman - Manual compiler.
#[derive(Parser)]
#[command(name = "sysman", version, about)]
struct Cli {
    /// Enable verbose output (log every generated page).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the HTML manual from a directory of page sources.
    Build(BuildArgs),
    /// Render a single page source to an HTML file.
    Page(PageArgs),
    /// Write the table of contents for the given page files.
    Index(IndexArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Page(args) => args.execute(),
        Commands::Index(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
