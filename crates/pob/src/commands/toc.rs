//! `pob toc` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use pob_config::{CliSettings, Config, TocConfig, TocScope};
use pob_site::PostProcessor;
use pob_toc::{HeadingScope, TableOfContents, TocOptions};

use crate::error::CliError;
use crate::output::Output;

/// Heading scope selectable on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    /// Headings inside the mount point.
    Mount,
    /// Headings anywhere in the document.
    Document,
}

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// HTML file or output directory (default: build.output_dir).
    path: Option<PathBuf>,

    /// Mount-point selector (overrides config).
    #[arg(short, long)]
    parent: Option<String>,

    /// Where headings are collected from (overrides config).
    #[arg(long, value_enum)]
    scope: Option<ScopeArg>,

    /// Print the outline of a single file as JSON instead of rewriting it.
    #[arg(long)]
    outline: bool,
}

impl TocArgs {
    /// Execute the toc command.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            toc_parent: self.parent,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let mut options = toc_options(&config.toc);
        if let Some(scope) = self.scope {
            options.scope = match scope {
                ScopeArg::Mount => HeadingScope::MountPoint,
                ScopeArg::Document => HeadingScope::Document,
            };
        }
        let toc = TableOfContents::new(options);
        let path = self
            .path
            .unwrap_or_else(|| config.build_resolved.output_dir.clone());

        if self.outline {
            if path.is_dir() {
                return Err(CliError::Validation(
                    "--outline requires an HTML file, not a directory".to_owned(),
                ));
            }
            let content = fs::read_to_string(&path)?;
            let Some(outline) = toc.outline(&content)? else {
                output.warning(&format!("No mount point matching {}", toc.options().parent));
                return Ok(());
            };
            output.json(&outline)?;
            return Ok(());
        }

        let processor = PostProcessor::new(toc);
        if path.is_file() {
            if processor.process_file(&path)? {
                output.success(&format!("Updated {}", path.display()));
            } else {
                output.info(&format!("Unchanged {}", path.display()));
            }
            return Ok(());
        }

        output.step(&format!("Processing {}", path.display()));
        let report = processor.run(&path)?;
        output.success(&format!(
            "Scanned {} pages, updated {}",
            report.scanned, report.rewritten
        ));
        if report.failed > 0 {
            output.warning(&format!("{} pages failed", report.failed));
        }
        Ok(())
    }
}

/// Transform options from the `[toc]` configuration section.
fn toc_options(config: &TocConfig) -> TocOptions {
    TocOptions {
        parent: config.parent.clone(),
        scope: match config.scope {
            TocScope::Mount => HeadingScope::MountPoint,
            TocScope::Document => HeadingScope::Document,
        },
        anchor_ids: config.anchor_ids,
    }
}
