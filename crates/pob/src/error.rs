//! CLI error types.

use pob_config::ConfigError;
use pob_feeds::FeedError;
use pob_site::SiteError;
use pob_toc::TocError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Toc(#[from] TocError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Feed(#[from] FeedError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
