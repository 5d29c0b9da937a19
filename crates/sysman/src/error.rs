//! CLI error types.

use sysman_config::ConfigError;
use sysman_manual::{BuildError, PageError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Page(#[from] PageError),

    /// Some pages failed while the rest of the manual was built.
    #[error("{failed} of {total} manual pages failed to build")]
    PagesFailed { failed: usize, total: usize },
}
