//! Feed aggregation errors.

/// Errors from reading, fetching or parsing feeds.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Http(String),
    /// Server answered with an error status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },
    /// Malformed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Text in an unsupported encoding.
    #[error("XML encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
    /// Document is neither RSS nor Atom.
    #[error("Unrecognized feed format: {0}")]
    UnknownFormat(String),
    /// Value is not an ISO-8601 duration.
    #[error("Invalid ISO-8601 duration: {0:?}")]
    InvalidDuration(String),
    /// Invalid `feeds.json`.
    #[error("Invalid feeds configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// `feeds.json` has no `feeds` array.
    #[error("No feeds array found")]
    MissingFeeds,
}
