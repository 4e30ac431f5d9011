//! Build-time aggregation of external feeds.
//!
//! [`FeedAggregator`] reads the feed list from `feeds.json`, fetches each
//! source through a [`FeedFetcher`] and returns one newest-first list of
//! [`FeedItem`]s. Items dated in the future or outside the duration window
//! are dropped, and repeated links are kept once.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use chrono::Utc;
//! use pob_feeds::{FeedAggregator, HttpFetcher, parse_duration};
//!
//! let fetcher = HttpFetcher::new(Duration::from_secs(10));
//! let mut aggregator = FeedAggregator::new("feeds.json", fetcher)
//!     .with_duration_limit(parse_duration("P6M").unwrap());
//! let items = aggregator.aggregate(Utc::now());
//! ```

mod aggregator;
mod duration;
mod error;
mod feed;
mod fetcher;
mod parser;
mod source;

pub use aggregator::{DEFAULT_DURATION_LIMIT, FeedAggregator};
pub use duration::parse_duration;
pub use error::FeedError;
pub use feed::{Feed, FeedEntry, FeedItem, ItemSource, parse_date};
pub use fetcher::{FeedFetcher, HttpFetcher};
pub use parser::parse_feed;
pub use source::{FeedSource, FeedsFile};
