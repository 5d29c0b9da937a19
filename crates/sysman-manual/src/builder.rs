//! Manual builder: renders every page of a source directory plus the index.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, PageError};
use crate::page::Page;
use crate::registry::ChapterRegistry;
use crate::scanner::{Scanner, file_name_of};

/// File name of the table of contents.
pub const INDEX_FILE_NAME: &str = "index.html";

/// Configuration for manual building.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildConfig {
    /// Process pages sorted by file name instead of directory listing order.
    pub sort_pages: bool,
    /// Abort the build on the first page error instead of skipping the page.
    pub fail_fast: bool,
}

/// A page that failed to build.
#[derive(Debug)]
pub struct PageFailure {
    /// Source file of the page.
    pub path: PathBuf,
    pub error: PageError,
}

/// Outcome of a manual build.
#[derive(Debug)]
pub struct BuildReport {
    /// Rendered page files, in processing order.
    pub pages: Vec<PathBuf>,
    /// Pages that were skipped because of an error.
    pub failures: Vec<PageFailure>,
    /// Path of the written table of contents.
    pub index: PathBuf,
    /// Pages registered for the table of contents.
    pub registry: ChapterRegistry,
}

impl BuildReport {
    /// Whether every discovered page was rendered.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds an HTML manual from a directory of page sources.
///
/// Each page is loaded, rendered and written to `<title>.<chapter>.html`,
/// then registered with a [`ChapterRegistry`] owned by this build. Once all
/// pages are processed the registry is rendered to `index.html`.
pub struct ManualBuilder {
    config: BuildConfig,
}

impl ManualBuilder {
    #[must_use]
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Build the manual into `output_dir`, creating it if needed.
    ///
    /// Page errors are collected in the report unless `fail_fast` is set, in
    /// which case the first one is returned as [`BuildError::Page`]. Pages
    /// that fail are not registered in the index.
    pub fn build(&self, source_dir: &Path, output_dir: &Path) -> Result<BuildReport, BuildError> {
        let sources = Scanner::new(source_dir.to_path_buf(), self.config.sort_pages).scan()?;

        fs::create_dir_all(output_dir).map_err(|source| BuildError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let mut registry = ChapterRegistry::new();
        let mut pages = Vec::new();
        let mut failures = Vec::new();

        for path in sources {
            match build_page(&path, output_dir, &mut registry) {
                Ok(output) => pages.push(output),
                Err(error) if self.config.fail_fast => {
                    return Err(BuildError::Page {
                        path,
                        source: error,
                    });
                }
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %error,
                        "Skipping manual page"
                    );
                    failures.push(PageFailure { path, error });
                }
            }
        }

        let index = write_index(&registry, output_dir)?;

        tracing::info!(
            page_count = pages.len(),
            failure_count = failures.len(),
            output_dir = %output_dir.display(),
            "Manual built"
        );

        Ok(BuildReport {
            pages,
            failures,
            index,
            registry,
        })
    }
}

/// Render one page source into `output_dir` and register it.
fn build_page(
    path: &Path,
    output_dir: &Path,
    registry: &mut ChapterRegistry,
) -> Result<PathBuf, PageError> {
    tracing::info!(page = %file_name_of(path), "Generating manual page");

    let page = Page::load(path)?;
    let output = output_dir.join(page.output_file_name());
    write_page(&page, &output)?;
    registry.register(page.title(), page.chapter());
    Ok(output)
}

/// Render `page` and write it to `output`.
pub fn write_page(page: &Page, output: &Path) -> Result<(), PageError> {
    let html = page.render()?;
    fs::write(output, html).map_err(|source| PageError::Io {
        path: output.to_path_buf(),
        source,
    })
}

/// Write the table of contents for `registry` into `output_dir`.
///
/// Returns the path of the written file.
pub fn write_index(registry: &ChapterRegistry, output_dir: &Path) -> Result<PathBuf, BuildError> {
    tracing::info!(page_count = registry.len(), "Writing the table of contents");

    let path = output_dir.join(INDEX_FILE_NAME);
    fs::write(&path, registry.render_index()).map_err(|source| BuildError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
