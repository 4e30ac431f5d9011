//! pob CLI - build-time tools for the site.
//!
//! Provides commands for:
//! - `toc`: Insert tables of contents into rendered pages
//! - `render`: Render a Markdown page with the site's amendments
//! - `hash`: Cache-busting query string and integrity attribute of an asset
//! - `externals`: Import map and cache version of external packages
//! - `feeds`: Aggregate external feeds
//! - `drafts`: List draft pages and whether they are published
//! - `service-worker`: Render the service worker with its cache name

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CommonArgs, DraftsArgs, ExternalsArgs, FeedsArgs, HashArgs, RenderArgs, ServiceWorkerArgs,
    TocArgs,
};
use output::Output;

/// pob - build-time tools for the site.
#[derive(Parser)]
#[command(name = "pob", version, about)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert tables of contents into rendered HTML.
    Toc(TocArgs),
    /// Render a Markdown file to HTML.
    Render(RenderArgs),
    /// Print the hashed URL and integrity attribute of an asset.
    Hash(HashArgs),
    /// Resolve external packages into an import map.
    Externals(ExternalsArgs),
    /// Aggregate the feeds listed in feeds.json.
    Feeds(FeedsArgs),
    /// List draft pages.
    Drafts(DraftsArgs),
    /// Render the service worker template.
    ServiceWorker(ServiceWorkerArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.common.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.common.config.as_deref();
    let result = match cli.command {
        Commands::Toc(args) => args.execute(config),
        Commands::Render(args) => args.execute(),
        Commands::Hash(args) => args.execute(),
        Commands::Externals(args) => args.execute(config),
        Commands::Feeds(args) => args.execute(config),
        Commands::Drafts(args) => args.execute(config),
        Commands::ServiceWorker(args) => args.execute(config),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
