//! `sysman page` command implementation.

use std::path::PathBuf;

use clap::Args;
use sysman_manual::{Page, write_page};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Page source file named `<title>.<chapter>`.
    input: PathBuf,

    /// HTML file to write.
    output: PathBuf,
}

impl PageArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        tracing::info!(page = %self.input.display(), "Generating manual page");
        let page = Page::load(&self.input)?;
        write_page(&page, &self.output)?;

        output.success(&format!(
            "Wrote {}({}) to {}",
            page.title(),
            page.chapter(),
            self.output.display()
        ));
        Ok(())
    }
}
