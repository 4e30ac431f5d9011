//! `pob service-worker` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use pob_assets::render_service_worker;
use pob_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the service-worker command.
#[derive(Args)]
pub(crate) struct ServiceWorkerArgs {
    /// Service worker template containing the cache name placeholder.
    template: PathBuf,

    /// Commit the build is made from (overrides site.commit_sha).
    #[arg(long, env = "COMMIT_SHA")]
    commit_sha: Option<String>,
}

impl ServiceWorkerArgs {
    /// Execute the service-worker command.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(config_path, None)?;

        let sha = self.commit_sha.unwrap_or(config.site.commit_sha);
        let template = fs::read_to_string(&self.template)?;
        output.data(&render_service_worker(&template, &sha));
        Ok(())
    }
}
