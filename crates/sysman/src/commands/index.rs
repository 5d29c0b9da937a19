//! `sysman index` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use sysman_manual::{ChapterRegistry, PageError, parse_page_file_name, write_index};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the index command.
#[derive(Args)]
pub(crate) struct IndexArgs {
    /// Directory to write `index.html` into.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Page files, in the order they should appear in each chapter.
    #[arg(required = true)]
    pages: Vec<PathBuf>,
}

impl IndexArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let registry = registry_from_files(&self.pages)?;
        let path = write_index(&registry, &self.output_dir)?;

        output.success(&format!(
            "Wrote table of contents for {} pages to {}",
            registry.len(),
            path.display()
        ));
        Ok(())
    }
}

/// Register pages by file name only; file contents are not read.
///
/// Names may carry a directory and an `.html` extension, so both source
/// files and rendered pages can be indexed.
fn registry_from_files(paths: &[PathBuf]) -> Result<ChapterRegistry, PageError> {
    let mut registry = ChapterRegistry::new();
    for path in paths {
        let name = page_file_name(path);
        let (title, chapter) = parse_page_file_name(&name)?;
        registry.register(title, chapter);
    }
    Ok(registry)
}

fn page_file_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(".html") {
        Some(stem) => stem.to_owned(),
        None => name,
    }
}
