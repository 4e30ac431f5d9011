//! Feed documents and aggregated items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed RSS or Atom document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Feed {
    /// Feed title.
    pub title: Option<String>,
    /// Website the feed belongs to.
    pub link: Option<String>,
    /// Feed-level author, used for entries without one.
    pub author: Option<String>,
    /// Entries in document order.
    pub entries: Vec<FeedEntry>,
}

/// One `<item>` or `<entry>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedEntry {
    /// Entry title.
    pub title: Option<String>,
    /// Permalink.
    pub link: Option<String>,
    /// Publication date as written in the document.
    pub published: Option<String>,
    /// Plain-text summary.
    pub description: Option<String>,
    /// Entry author.
    pub author: Option<String>,
}

/// Where an aggregated item came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSource {
    /// Display name from `feeds.json`.
    pub name: String,
    /// Feed URL.
    pub url: String,
    /// Website URL, from `feeds.json` or the feed itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
}

/// An item of the aggregated feed, as exposed to templates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Entry title.
    pub title: String,
    /// Permalink.
    pub link: String,
    /// Publication date.
    pub date: DateTime<Utc>,
    /// Source feed.
    pub source: ItemSource,
    /// Plain-text summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Entry or feed author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Parse an RFC 3339 (Atom) or RFC 2822 (RSS) date.
///
/// # Examples
///
/// ```
/// use pob_feeds::parse_date;
///
/// let atom = parse_date("2024-03-01T10:00:00+01:00").unwrap();
/// let rss = parse_date("Fri, 01 Mar 2024 09:00:00 GMT").unwrap();
/// assert_eq!(atom, rss);
/// assert!(parse_date("yesterday").is_none());
/// ```
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .ok()
        .map(|date| date.with_timezone(&Utc))
}
