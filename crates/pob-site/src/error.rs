//! Site processing errors.

use std::io;
use std::path::PathBuf;

use pob_toc::TocError;

/// Errors from draft gating and post-processing.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Output directory does not exist.
    #[error("Output directory not found: {}", .0.display())]
    OutputNotFound(PathBuf),
    /// Reading or writing a page failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Page path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// Table-of-contents transform failed.
    #[error("Table of contents failed for {}: {source}", path.display())]
    Toc {
        /// Page path.
        path: PathBuf,
        /// Underlying error.
        source: TocError,
    },
    /// Invalid front matter.
    #[error("Invalid front matter: {0}")]
    FrontMatter(String),
}
