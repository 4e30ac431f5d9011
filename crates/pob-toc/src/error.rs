//! Error types for the table-of-contents transform.

/// Error returned by [`TableOfContents::apply`](crate::TableOfContents::apply).
#[derive(Debug, thiserror::Error)]
pub enum TocError {
    /// The mount-point locator is not a valid CSS selector.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Writing the transformed document back to text failed.
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] std::io::Error),

    /// The serialized document was not valid UTF-8.
    #[error("Serialized document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
