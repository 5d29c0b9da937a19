//! Error types for page loading and manual building.

use std::io;
use std::path::PathBuf;

use sysman_markup::RenderError;

/// Error for a single manual page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// File name is not `<title>.<digit>`.
    #[error("invalid page file name `{0}`: expected <title>.<chapter>")]
    InvalidPageFilename(String),
    /// Chapter digit outside 1-6.
    #[error("invalid chapter number {chapter} in `{file_name}`: expected 1-6")]
    InvalidChapterNumber { file_name: String, chapter: u8 },
    /// Source unreadable or destination unwritable.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Inline markup could not be parsed.
    #[error("{page}: {source}")]
    Render {
        page: String,
        #[source]
        source: RenderError,
    },
}

/// Error that aborts a whole manual build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Source directory not found: {}", .0.display())]
    SourceDirNotFound(PathBuf),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A page failed while building in fail-fast mode.
    #[error("{}: {source}", path.display())]
    Page {
        path: PathBuf,
        #[source]
        source: PageError,
    },
}
