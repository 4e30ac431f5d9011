//! `pob render` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use pob_markdown::MarkdownRenderer;
use pob_site::split_front_matter;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Also list the code languages the page needs.
    #[arg(long)]
    languages: bool,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let source = fs::read_to_string(&self.file)?;
        let body = split_front_matter(&source).map_or(source.as_str(), |(_, body)| body);

        let page = self.file.to_string_lossy();
        let mut renderer = MarkdownRenderer::new();
        let html = renderer.render(body, Some(page.as_ref()));
        output.data(html.trim_end());

        if self.languages {
            let languages = renderer.languages().languages_for(&page);
            output.info(&format!("Languages: {}", languages.join(", ")));
        }
        Ok(())
    }
}
