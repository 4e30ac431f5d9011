//! Error types for asset helpers.

use std::path::PathBuf;

/// Error returned when a package manifest cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// I/O error reading a file.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// A `package.json` is not valid JSON.
    #[error("Invalid package.json for {package}: {source}")]
    Manifest {
        /// Package name.
        package: String,
        /// Underlying error.
        source: serde_json::Error,
    },
    /// A `package.json` has no `version`.
    #[error("package.json for {0} has no version")]
    MissingVersion(String),
}
