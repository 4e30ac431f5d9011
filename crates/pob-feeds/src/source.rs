//! `feeds.json`: the list of feeds to aggregate.

use serde::Deserialize;

use crate::error::FeedError;

/// A feed to aggregate.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSource {
    /// Display name.
    pub name: String,
    /// Feed URL.
    pub url: String,
    /// Website URL. Falls back to the feed's own link.
    #[serde(default)]
    pub site_url: Option<String>,
}

/// Contents of `feeds.json`.
#[derive(Debug, Deserialize)]
pub struct FeedsFile {
    #[serde(default)]
    feeds: Option<Vec<FeedSource>>,
}

impl FeedsFile {
    /// Parse `feeds.json` content into its feed list.
    ///
    /// # Examples
    ///
    /// ```
    /// use pob_feeds::FeedsFile;
    ///
    /// let sources = FeedsFile::parse(r#"{"feeds": [{"name": "A", "url": "https://a.example/rss"}]}"#).unwrap();
    /// assert_eq!(sources[0].name, "A");
    /// assert!(FeedsFile::parse("{}").is_err());
    /// ```
    pub fn parse(content: &str) -> Result<Vec<FeedSource>, FeedError> {
        let file: Self = serde_json::from_str(content)?;
        file.feeds.ok_or(FeedError::MissingFeeds)
    }
}
