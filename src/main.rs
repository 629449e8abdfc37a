//! mdnotes: serve a directory of Markdown notes with YAML front matter.
//!
//! Logging: set `RUST_LOG=mdnotes=debug` (or `warn`, `trace`) to adjust the
//! stderr output.

mod cli;
mod docs;
mod error;
mod frontmatter;
mod http;
mod index;
mod render;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::docs::DocumentStore;
use crate::http::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mdnotes=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = DocumentStore::new(&cli.docs_dir);
    let scan = index::scan(&store).context("initial document scan failed")?;
    tracing::info!(
        docs_dir = %cli.docs_dir.display(),
        categories = scan.index.len(),
        skipped = scan.skipped.len(),
        "document index ready"
    );

    let app = http::router(AppState::new(store, scan.index), &cli.static_dir);
    http::serve(app, &cli.bind).await
}
