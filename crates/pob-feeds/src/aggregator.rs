//! Aggregating the configured feeds into one newest-first list.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};

use crate::feed::{Feed, FeedItem, ItemSource, parse_date};
use crate::fetcher::FeedFetcher;
use crate::source::{FeedSource, FeedsFile};

/// Window applied when no duration limit is configured.
pub const DEFAULT_DURATION_LIMIT: TimeDelta = TimeDelta::days(365);

struct CachedAggregate {
    config: String,
    items: Vec<FeedItem>,
}

/// Aggregates the feeds listed in a `feeds.json` file.
///
/// The aggregate is cached until the configuration file's content changes
/// or [`on_watch_change`](Self::on_watch_change) reports an edit to it.
pub struct FeedAggregator<F> {
    config_file: PathBuf,
    fetcher: F,
    duration_limit: TimeDelta,
    cache: Option<CachedAggregate>,
}

impl<F: FeedFetcher> FeedAggregator<F> {
    /// Create an aggregator reading `config_file` and fetching with `fetcher`.
    pub fn new(config_file: impl Into<PathBuf>, fetcher: F) -> Self {
        Self {
            config_file: config_file.into(),
            fetcher,
            duration_limit: DEFAULT_DURATION_LIMIT,
            cache: None,
        }
    }

    /// Drop items older than `limit` before the aggregation time.
    #[must_use]
    pub fn with_duration_limit(mut self, limit: TimeDelta) -> Self {
        self.duration_limit = limit;
        self
    }

    /// Path of the `feeds.json` file.
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Aggregate every configured feed as of `now`.
    ///
    /// Sources that fail to fetch are logged and skipped. An unreadable or
    /// invalid configuration yields an empty list.
    pub fn aggregate(&mut self, now: DateTime<Utc>) -> Vec<FeedItem> {
        let config = match fs::read_to_string(&self.config_file) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %self.config_file.display(), error = %e, "Could not read feeds configuration");
                return Vec::new();
            }
        };

        if let Some(cached) = &self.cache
            && cached.config == config
        {
            tracing::debug!(items = cached.items.len(), "Using cached feed aggregate");
            return cached.items.clone();
        }

        let sources = match FeedsFile::parse(&config) {
            Ok(sources) => sources,
            Err(e) => {
                tracing::warn!(path = %self.config_file.display(), error = %e, "Invalid feeds configuration");
                return Vec::new();
            }
        };

        let items = self.collect(&sources, now);
        self.cache = Some(CachedAggregate {
            config,
            items: items.clone(),
        });
        items
    }

    /// Clear the cache when `changed` includes the configuration file.
    pub fn on_watch_change<P: AsRef<Path>>(&mut self, changed: &[P]) {
        let touched = changed.iter().any(|path| {
            let path = path.as_ref();
            path == self.config_file || path.file_name() == self.config_file.file_name()
        });
        if touched {
            tracing::debug!(path = %self.config_file.display(), "Feeds configuration changed, clearing cache");
            self.clear_cache();
        }
    }

    /// Forget the cached aggregate.
    pub fn clear_cache(&mut self) {
        self.cache = None;
    }

    fn collect(&self, sources: &[FeedSource], now: DateTime<Utc>) -> Vec<FeedItem> {
        let oldest = now.checked_sub_signed(self.duration_limit);
        let mut items = Vec::new();

        for source in sources {
            tracing::info!(name = %source.name, url = %source.url, "Fetching feed");
            let feed = match self.fetcher.fetch(&source.url) {
                Ok(feed) => feed,
                Err(e) => {
                    tracing::error!(name = %source.name, url = %source.url, error = %e, "Failed to fetch feed");
                    continue;
                }
            };
            let before = items.len();
            items.extend(feed_items(source, feed));
            tracing::info!(name = %source.name, items = items.len() - before, "Fetched feed");
        }

        items.retain(|item| item.date <= now && oldest.is_none_or(|oldest| item.date >= oldest));

        let mut seen = HashSet::new();
        items.retain(|item| seen.insert(item.link.clone()));

        items.sort_by(|a, b| b.date.cmp(&a.date));
        tracing::info!(items = items.len(), "Aggregated feeds");
        items
    }
}

/// Items of one fetched feed, skipping entries without a link or a date.
fn feed_items(source: &FeedSource, feed: Feed) -> impl Iterator<Item = FeedItem> + '_ {
    let site_url = source.site_url.clone().or(feed.link);
    let feed_author = feed.author;

    feed.entries.into_iter().filter_map(move |entry| {
        let link = entry.link?;
        let Some(date) = entry.published.as_deref().and_then(parse_date) else {
            tracing::debug!(link = %link, "Skipping feed entry without a valid date");
            return None;
        };
        Some(FeedItem {
            title: entry.title.unwrap_or_default(),
            link,
            date,
            source: ItemSource {
                name: source.name.clone(),
                url: source.url.clone(),
                site_url: site_url.clone(),
            },
            description: entry.description,
            author: entry.author.or_else(|| feed_author.clone()),
        })
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::FeedError;
    use crate::feed::FeedEntry;

    const CONFIG: &str = r#"{"feeds": [{"name": "Test Blog", "url": "https://example.com/rss", "siteUrl": "https://example.com"}]}"#;

    #[derive(Default)]
    struct MockFetcher {
        feeds: HashMap<String, Feed>,
        calls: Cell<usize>,
    }

    impl MockFetcher {
        fn with(mut self, url: &str, feed: Feed) -> Self {
            self.feeds.insert(url.to_owned(), feed);
            self
        }
    }

    impl FeedFetcher for MockFetcher {
        fn fetch(&self, url: &str) -> Result<Feed, FeedError> {
            self.calls.set(self.calls.get() + 1);
            self.feeds
                .get(url)
                .cloned()
                .ok_or_else(|| FeedError::Http("Network error".to_owned()))
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn entry(title: &str, link: &str, date: &str) -> FeedEntry {
        FeedEntry {
            title: Some(title.to_owned()),
            link: Some(link.to_owned()),
            published: Some(date.to_owned()),
            ..FeedEntry::default()
        }
    }

    fn sample_feed() -> Feed {
        Feed {
            entries: vec![
                entry("Post 1", "https://example.com/1", "2025-06-15T08:00:00Z"),
                entry("Old Post", "https://example.com/2", "2020-01-01T12:00:00Z"),
                entry("Future Post", "https://example.com/3", "2025-07-15T12:00:00Z"),
            ],
            ..Feed::default()
        }
    }

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feeds.json");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn titles(items: &[FeedItem]) -> Vec<&str> {
        items.iter().map(|item| item.title.as_str()).collect()
    }

    #[test]
    fn test_filters_old_and_future_posts() {
        let (_dir, path) = write_config(CONFIG);
        let fetcher = MockFetcher::default().with("https://example.com/rss", sample_feed());
        let mut aggregator = FeedAggregator::new(path, fetcher);

        let items = aggregator.aggregate(now());

        assert_eq!(titles(&items), vec!["Post 1"]);
        assert_eq!(items[0].source.site_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_custom_duration_limit() {
        let (_dir, path) = write_config(CONFIG);
        let fetcher = MockFetcher::default().with("https://example.com/rss", sample_feed());
        let mut aggregator =
            FeedAggregator::new(path, fetcher).with_duration_limit(TimeDelta::days(365 * 10));

        assert_eq!(titles(&aggregator.aggregate(now())), vec!["Post 1", "Old Post"]);
    }

    #[test]
    fn test_fetch_errors_yield_empty() {
        let (_dir, path) = write_config(CONFIG);
        let mut aggregator = FeedAggregator::new(path, MockFetcher::default());

        assert!(aggregator.aggregate(now()).is_empty());
    }

    #[test]
    fn test_failed_source_does_not_stop_others() {
        let (_dir, path) = write_config(
            r#"{"feeds": [
                {"name": "Down", "url": "https://down.example/rss"},
                {"name": "Up", "url": "https://up.example/rss"}
            ]}"#,
        );
        let feed = Feed {
            link: Some("https://up.example/".to_owned()),
            author: Some("Up Author".to_owned()),
            entries: vec![entry("Hello", "https://up.example/hello", "2025-06-01T00:00:00Z")],
            ..Feed::default()
        };
        let fetcher = MockFetcher::default().with("https://up.example/rss", feed);
        let mut aggregator = FeedAggregator::new(path, fetcher);

        let items = aggregator.aggregate(now());

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source.name, "Up");
        assert_eq!(items[0].source.site_url.as_deref(), Some("https://up.example/"));
        assert_eq!(items[0].author.as_deref(), Some("Up Author"));
    }

    #[test]
    fn test_sorted_newest_first_and_deduplicated() {
        let (_dir, path) = write_config(CONFIG);
        let feed = Feed {
            entries: vec![
                entry("Older", "https://example.com/a", "2025-05-01T00:00:00Z"),
                entry("Newer", "https://example.com/b", "Tue, 10 Jun 2025 09:00:00 GMT"),
                entry("Repeat", "https://example.com/a", "2025-05-02T00:00:00Z"),
                entry("Undated", "https://example.com/c", "sometime"),
            ],
            ..Feed::default()
        };
        let fetcher = MockFetcher::default().with("https://example.com/rss", feed);
        let mut aggregator = FeedAggregator::new(path, fetcher);

        assert_eq!(titles(&aggregator.aggregate(now())), vec!["Newer", "Older"]);
    }

    #[test]
    fn test_unreadable_config_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut aggregator = FeedAggregator::new(dir.path().join("missing.json"), MockFetcher::default());
        assert!(aggregator.aggregate(now()).is_empty());
    }

    #[test]
    fn test_missing_feeds_array_yields_empty() {
        let (_dir, path) = write_config(r#"{"sources": []}"#);
        let mut aggregator = FeedAggregator::new(path, MockFetcher::default());
        assert!(aggregator.aggregate(now()).is_empty());
    }

    #[test]
    fn test_result_is_cached_until_config_changes() {
        let (_dir, path) = write_config(CONFIG);
        let fetcher = MockFetcher::default().with("https://example.com/rss", sample_feed());
        let mut aggregator = FeedAggregator::new(path.clone(), fetcher);

        aggregator.aggregate(now());
        aggregator.aggregate(now());
        assert_eq!(aggregator.fetcher.calls.get(), 1);

        fs::write(&path, CONFIG.replace("Test Blog", "Renamed")).unwrap();
        let items = aggregator.aggregate(now());
        assert_eq!(aggregator.fetcher.calls.get(), 2);
        assert_eq!(items[0].source.name, "Renamed");
    }

    #[test]
    fn test_watch_change_clears_cache() {
        let (_dir, path) = write_config(CONFIG);
        let fetcher = MockFetcher::default().with("https://example.com/rss", sample_feed());
        let mut aggregator = FeedAggregator::new(path, fetcher);

        aggregator.aggregate(now());
        aggregator.on_watch_change(&["src/posts/hello.md"]);
        aggregator.aggregate(now());
        assert_eq!(aggregator.fetcher.calls.get(), 1);

        aggregator.on_watch_change(&["feeds.json"]);
        aggregator.aggregate(now());
        assert_eq!(aggregator.fetcher.calls.get(), 2);
    }

    #[test]
    fn test_serialized_item_shape() {
        let (_dir, path) = write_config(CONFIG);
        let fetcher = MockFetcher::default().with("https://example.com/rss", sample_feed());
        let mut aggregator = FeedAggregator::new(path, fetcher);

        let items = aggregator.aggregate(now());
        let value = serde_json::to_value(&items[0]).unwrap();

        assert_eq!(value["title"], "Post 1");
        assert_eq!(value["date"], "2025-06-15T08:00:00Z");
        assert_eq!(value["source"]["siteUrl"], "https://example.com");
        assert!(value.get("author").is_none());
    }
}
