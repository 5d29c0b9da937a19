//! Page source discovery.
//!
//! Lists the files directly inside the source directory. Hidden entries and
//! subdirectories are skipped, with a warning for hidden files since they
//! are usually misnamed pages. Everything else is treated as a page source
//! and validated when it is loaded.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BuildError;

/// Discovers page source files in a directory.
pub(crate) struct Scanner {
    source_dir: PathBuf,
    sort: bool,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// With `sort` unset, files come back in directory listing order.
    pub fn new(source_dir: PathBuf, sort: bool) -> Self {
        Self { source_dir, sort }
    }

    /// Scan the source directory and return page source paths.
    pub fn scan(&self) -> Result<Vec<PathBuf>, BuildError> {
        if !self.source_dir.is_dir() {
            return Err(BuildError::SourceDirNotFound(self.source_dir.clone()));
        }

        let entries = fs::read_dir(&self.source_dir).map_err(|e| self.io_error(e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| self.io_error(e))?;
            let path = entry.path();

            let is_file = entry.file_type().is_ok_and(|t| t.is_file());
            if entry.file_name().to_string_lossy().starts_with('.') {
                if is_file {
                    tracing::warn!(path = %path.display(), "Skipping hidden page source");
                } else {
                    tracing::debug!(path = %path.display(), "Skipping hidden entry");
                }
                continue;
            }
            if !is_file {
                tracing::debug!(path = %path.display(), "Skipping non-file entry");
                continue;
            }
            paths.push(path);
        }

        if self.sort {
            paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        }

        tracing::debug!(
            source_dir = %self.source_dir.display(),
            page_count = paths.len(),
            "Source scan completed"
        );
        Ok(paths)
    }

    fn io_error(&self, source: std::io::Error) -> BuildError {
        BuildError::Io {
            path: self.source_dir.clone(),
            source,
        }
    }
}

/// File name of `path` as a string, for sorting and display.
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
