//! `pob drafts` command implementation.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use pob_config::{CliSettings, Config};
use pob_site::{DraftPolicy, RunMode, find_drafts};

use crate::error::CliError;
use crate::output::Output;

/// Run mode selectable on the command line.
#[derive(Clone, Copy, Default, ValueEnum)]
enum ModeArg {
    #[default]
    Build,
    Serve,
    Watch,
}

impl From<ModeArg> for RunMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Build => Self::Build,
            ModeArg::Serve => Self::Serve,
            ModeArg::Watch => Self::Watch,
        }
    }
}

/// Arguments for the drafts command.
#[derive(Args)]
pub(crate) struct DraftsArgs {
    /// Directory of Markdown sources.
    input_dir: PathBuf,

    /// Run mode to evaluate the drafts for.
    #[arg(long, value_enum, default_value_t)]
    mode: ModeArg,

    /// Build drafts regardless of the run mode (overrides config).
    #[arg(long)]
    build_drafts: bool,
}

impl DraftsArgs {
    /// Execute the drafts command.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            build_drafts: self.build_drafts.then_some(true),
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let policy = DraftPolicy::new(self.mode.into()).with_build_drafts(config.drafts.build_drafts);

        let drafts = find_drafts(&self.input_dir, &policy)?;
        if drafts.is_empty() {
            output.info("No drafts");
            return Ok(());
        }

        for draft in &drafts {
            let title = draft.title.as_deref().unwrap_or("(untitled)");
            let line = format!("{title}  {}", draft.path.display());
            if draft.hidden {
                output.warning(&format!("hidden     {line}"));
            } else {
                output.success(&format!("published  {line}"));
            }
        }
        Ok(())
    }
}
