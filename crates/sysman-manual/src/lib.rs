//! Manual page loading, chapter index and HTML manual building.
//!
//! Page sources are files named `<title>.<chapter>`. [`ManualBuilder`] renders
//! every source in a directory into `<title>.<chapter>.html` and writes an
//! `index.html` table of contents grouped by [`Chapter`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use sysman_manual::{BuildConfig, ManualBuilder};
//!
//! let report = ManualBuilder::new(BuildConfig::default())
//!     .build(Path::new("src"), Path::new("out"))
//!     .unwrap();
//! assert!(report.is_success());
//! ```

mod builder;
mod chapter;
mod error;
mod page;
mod registry;
mod scanner;

pub use builder::{
    BuildConfig, BuildReport, INDEX_FILE_NAME, ManualBuilder, PageFailure, write_index, write_page,
};
pub use chapter::Chapter;
pub use error::{BuildError, PageError};
pub use page::{Page, parse_page_file_name};
pub use registry::ChapterRegistry;
