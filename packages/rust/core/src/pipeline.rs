//! End-to-end `run` pipeline: CSV → star enrichment → README table.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, instrument};

use startable_shared::{Result, SectionMarkers, StarsConfig};

use crate::enrichment::{self, EnrichResult};
use crate::update::{self, UpdateReadmeResult};

/// Configuration for the full `run` pipeline.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Document containing the table section.
    pub readme_path: PathBuf,
    /// Catalog CSV, rewritten by enrichment then rendered.
    pub csv_path: PathBuf,
    /// GitHub lookup settings, token already resolved.
    pub stars: StarsConfig,
    /// Markers bounding the table section.
    pub markers: SectionMarkers,
}

/// Result of the full `run` pipeline.
#[derive(Debug)]
pub struct RunResult {
    /// Star enrichment summary.
    pub enrich: EnrichResult,
    /// README update summary.
    pub readme: UpdateReadmeResult,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called each time a row's star lookup finishes.
    fn row_enriched(&self, name: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &RunResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn row_enriched(&self, _name: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &RunResult) {}
}

/// Run the full pipeline.
///
/// 1. Enrich the CSV with star counts (rewrites the CSV)
/// 2. Regenerate the README table from the enriched CSV
#[instrument(skip_all, fields(readme = %config.readme_path.display(), csv = %config.csv_path.display()))]
pub async fn run(config: &RunConfig, progress: &dyn ProgressReporter) -> Result<RunResult> {
    let start = Instant::now();

    info!("Updating GitHub star counts...");
    progress.phase("Fetching GitHub star counts");
    let enrich =
        enrichment::update_csv_with_stars(&config.csv_path, &config.stars, progress).await?;

    info!("Updating README table...");
    progress.phase("Updating README table");
    let readme = update::update_readme_table(&config.readme_path, &config.csv_path, &config.markers)?;

    let result = RunResult {
        enrich,
        readme,
        elapsed: start.elapsed(),
    };

    info!(
        duration_ms = result.elapsed.as_millis(),
        "All updates completed successfully"
    );
    progress.done(&result);

    Ok(result)
}
