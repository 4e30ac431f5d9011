//! CLI subcommands.

mod drafts;
mod externals;
mod feeds;
mod hash;
mod render;
mod service_worker;
mod toc;

use std::path::PathBuf;

use clap::Args;

pub(crate) use drafts::DraftsArgs;
pub(crate) use externals::ExternalsArgs;
pub(crate) use feeds::FeedsArgs;
pub(crate) use hash::HashArgs;
pub(crate) use render::RenderArgs;
pub(crate) use service_worker::ServiceWorkerArgs;
pub(crate) use toc::TocArgs;

/// Options shared by every subcommand.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover pob.toml).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}
