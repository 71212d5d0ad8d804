//! Star enrichment of the catalog CSV.
//!
//! Every row gets a `github_stars` cell: the repository's stargazer count
//! when its links point at a GitHub repository and the lookup succeeds,
//! otherwise `"N/A"`. Lookups run concurrently; one failing row never
//! affects the others.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, instrument, warn};

use startable_github::{GitHubClient, RepoRef};
use startable_shared::{
    CatalogRow, CatalogTable, LINKS_COLUMN, NAME_COLUMN, NOT_AVAILABLE, Result, STARS_COLUMN,
    StarsConfig, StartableError, hosted_link,
};

use crate::pipeline::ProgressReporter;

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Summary of an enrichment run.
#[derive(Debug, Clone)]
pub struct EnrichResult {
    /// CSV file that was rewritten.
    pub csv_path: PathBuf,
    /// Rows processed.
    pub rows: usize,
    /// Rows that received a star count.
    pub enriched: usize,
    /// Rows set to `"N/A"`.
    pub unavailable: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// Per-row lookup
// ---------------------------------------------------------------------------

/// Resolve the `github_stars` value for one row.
///
/// Fetch failures ([`StartableError::is_fetch_failure`]) degrade to `"N/A"`;
/// any other error is returned.
pub(crate) async fn lookup_stars(client: &GitHubClient, row: &CatalogRow) -> Result<String> {
    let Some(link) = hosted_link(row.cell(LINKS_COLUMN)) else {
        return Ok(NOT_AVAILABLE.to_string());
    };

    let Some(repo) = RepoRef::parse(link) else {
        debug!(link, "link is not shaped like a repository");
        return Ok(NOT_AVAILABLE.to_string());
    };

    match client.stargazers(&repo).await {
        Ok(count) => Ok(count.to_string()),
        Err(e) if e.is_fetch_failure() => {
            if matches!(e, StartableError::Network(_)) {
                error!(%repo, error = %e, "Error fetching stars");
            } else {
                warn!(%repo, error = %e, "Failed to fetch stars");
            }
            Ok(NOT_AVAILABLE.to_string())
        }
        Err(e) => Err(e),
    }
}

/// Fill `github_stars` on every row of `table`, adding the column if needed.
///
/// At most `config.max_concurrency` lookups are in flight (all rows when 0).
/// Values are applied by position, so row order never depends on which
/// response arrives first.
pub(crate) async fn enrich_table(
    table: &mut CatalogTable,
    config: &StarsConfig,
    progress: &dyn ProgressReporter,
) -> Result<()> {
    table.ensure_column(STARS_COLUMN);

    let total = table.rows.len();
    let limit = match config.max_concurrency {
        0 => total.max(1),
        n => n,
    };

    // The session lives only for this batch.
    let client = GitHubClient::new(config)?;
    let client = &client;
    let completed = AtomicUsize::new(0);
    let completed = &completed;

    let values: Vec<Result<String>> = stream::iter(table.rows.iter())
        .map(move |row| async move {
            let value = lookup_stars(client, row).await;
            let current = completed.fetch_add(1, Ordering::Relaxed) + 1;
            progress.row_enriched(row.cell(NAME_COLUMN), current, total);
            value
        })
        .buffered(limit)
        .collect()
        .await;

    let values = values.into_iter().collect::<Result<Vec<_>>>()?;
    for (row, value) in table.rows.iter_mut().zip(values) {
        row.set(STARS_COLUMN, value);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Pipeline entry point
// ---------------------------------------------------------------------------

/// Update the CSV at `csv_path` with GitHub star counts.
///
/// 1. Load the catalog (missing or unreadable file is an error)
/// 2. Look up every row concurrently
/// 3. Rewrite the whole file, header first
#[instrument(skip_all, fields(csv = %csv_path.display()))]
pub async fn update_csv_with_stars(
    csv_path: &Path,
    config: &StarsConfig,
    progress: &dyn ProgressReporter,
) -> Result<EnrichResult> {
    let start = Instant::now();

    let mut table = startable_storage::load_table(csv_path)?;
    debug!(rows = table.rows.len(), "fetching star counts");

    enrich_table(&mut table, config, progress).await?;

    startable_storage::save_table(csv_path, &table)?;

    let unavailable = table
        .rows
        .iter()
        .filter(|row| row.cell(STARS_COLUMN) == NOT_AVAILABLE)
        .count();

    let result = EnrichResult {
        csv_path: csv_path.to_path_buf(),
        rows: table.rows.len(),
        enriched: table.rows.len() - unavailable,
        unavailable,
        elapsed: start.elapsed(),
    };

    info!(
        enriched = result.enriched,
        unavailable = result.unavailable,
        duration_ms = result.elapsed.as_millis(),
        "Updated {} with GitHub star counts",
        csv_path.display()
    );

    Ok(result)
}
