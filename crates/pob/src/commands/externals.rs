//! `pob externals` command implementation.

use std::path::Path;

use clap::Args;
use pob_assets::Externals;
use pob_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the externals command.
#[derive(Args)]
pub(crate) struct ExternalsArgs {
    /// Also list the directory copies the build performs.
    #[arg(long)]
    passthrough: bool,
}

impl ExternalsArgs {
    /// Execute the externals command.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(config_path, None)?;

        let settings = &config.externals_resolved;
        let externals = Externals::resolve(&settings.node_modules, &settings.packages);
        if externals.versions.len() < settings.packages.len() {
            output.warning(&format!(
                "Resolved {} of {} packages",
                externals.versions.len(),
                settings.packages.len()
            ));
        }

        output.json(&externals)?;
        if self.passthrough {
            for copy in &externals.passthrough {
                output.info(&format!("{} -> {}", copy.source.display(), copy.destination));
            }
        }
        Ok(())
    }
}
