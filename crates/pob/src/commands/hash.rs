//! `pob hash` command implementation.

use std::path::PathBuf;

use clap::Args;
use pob_assets::{hash_content, ssri};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the hash command.
#[derive(Args)]
pub(crate) struct HashArgs {
    /// Asset path as referenced from a page (e.g. `/css/site.css`).
    file: String,

    /// Directory the asset path is resolved against.
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

impl HashArgs {
    /// Execute the hash command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        output.data(&hash_content(&self.root, &self.file));
        let integrity = ssri(&self.root, &self.file);
        if integrity.is_empty() {
            output.warning(&format!("No integrity attribute for {}", self.file));
        } else {
            output.data(&integrity);
        }
        Ok(())
    }
}
