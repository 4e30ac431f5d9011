//! Fetching feed documents.

use std::time::Duration;

use ureq::Agent;

use crate::error::FeedError;
use crate::feed::Feed;
use crate::parser::parse_feed;

const ACCEPT: &str = "application/rss+xml, application/atom+xml, application/xml;q=0.9, */*;q=0.8";

/// Source of feed documents.
pub trait FeedFetcher {
    /// Fetch and parse the feed at `url`.
    fn fetch(&self, url: &str) -> Result<Feed, FeedError>;
}

/// Fetches feeds over HTTP.
pub struct HttpFetcher {
    agent: Agent,
}

impl HttpFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl FeedFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Feed, FeedError> {
        let response = self
            .agent
            .get(url)
            .header("Accept", ACCEPT)
            .call()
            .map_err(|e| FeedError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(FeedError::Status {
                url: url.to_owned(),
                status,
            });
        }

        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| FeedError::Http(e.to_string()))?;
        parse_feed(&body)
    }
}
