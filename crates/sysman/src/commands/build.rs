//! `sysman build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use sysman_config::{CliSettings, Config};
use sysman_manual::{BuildConfig, ManualBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover sysman.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated HTML (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Process pages sorted by file name for a reproducible index.
    #[arg(long)]
    sort: bool,

    /// Abort on the first page that fails instead of skipping it.
    #[arg(long)]
    fail_fast: bool,

    /// Keep existing files in the output directory.
    #[arg(long)]
    no_clean: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            clean_output: self.no_clean.then_some(false),
            sort_pages: self.sort.then_some(true),
            fail_fast: self.fail_fast.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let manual = &config.manual_resolved;

        output.location("Source", &manual.source_dir);
        output.location("Output", &manual.output_dir);

        if manual.clean_output {
            clean_output_dir(&manual.output_dir)?;
        }

        let builder = ManualBuilder::new(BuildConfig {
            sort_pages: manual.sort_pages,
            fail_fast: manual.fail_fast,
        });
        let report = builder.build(&manual.source_dir, &manual.output_dir)?;

        for failure in &report.failures {
            output.page_failure(failure);
        }
        output.build_summary(&report, &manual.output_dir);

        if !report.is_success() {
            return Err(CliError::PagesFailed {
                failed: report.failures.len(),
                total: report.failures.len() + report.pages.len(),
            });
        }
        Ok(())
    }
}

/// Remove the output directory so no stale pages survive the build.
fn clean_output_dir(dir: &Path) -> Result<(), CliError> {
    if dir.exists() {
        tracing::info!(output_dir = %dir.display(), "Cleaning output directory");
        fs::remove_dir_all(dir)?;
    }
    Ok(())
}
