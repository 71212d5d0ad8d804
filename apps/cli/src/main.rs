//! startable CLI: keeps the README catalog table in sync with its CSV.
//!
//! Enriches the catalog with GitHub star counts, then regenerates the
//! Markdown table section of the README.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = commands::load_app_config(&cli)?;
    let _log_guard = commands::init_tracing(&cli, &config.paths.log_dir)?;
    commands::run(cli, config).await
}
