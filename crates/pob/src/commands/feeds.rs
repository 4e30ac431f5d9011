//! `pob feeds` command implementation.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use clap::Args;
use pob_config::Config;
use pob_feeds::{DEFAULT_DURATION_LIMIT, FeedAggregator, HttpFetcher, parse_duration};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the feeds command.
#[derive(Args)]
pub(crate) struct FeedsArgs {
    /// ISO-8601 duration of the item window (overrides feeds.duration_limit).
    #[arg(long)]
    duration_limit: Option<String>,
}

impl FeedsArgs {
    /// Execute the feeds command.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(config_path, None)?;
        let settings = &config.feeds_resolved;

        let limit = match self.duration_limit.as_ref().or(settings.duration_limit.as_ref()) {
            Some(limit) => parse_duration(limit)?,
            None => DEFAULT_DURATION_LIMIT,
        };

        tracing::debug!(
            config_file = %settings.config_file.display(),
            limit_days = limit.num_days(),
            "Aggregating feeds"
        );
        let fetcher = HttpFetcher::new(Duration::from_secs(settings.timeout_secs));
        let mut aggregator =
            FeedAggregator::new(&settings.config_file, fetcher).with_duration_limit(limit);
        let items = aggregator.aggregate(Utc::now());

        if items.is_empty() {
            output.warning("No feed items aggregated");
        } else {
            output.success(&format!("Aggregated {} items", items.len()));
        }
        output.json(&items)?;
        Ok(())
    }
}
