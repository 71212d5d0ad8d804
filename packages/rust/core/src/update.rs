//! README table regeneration.
//!
//! Reads the catalog CSV, renders it as a Markdown table, and splices the
//! table into the marked section of the README. Text outside the section is
//! left untouched.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use startable_shared::{Result, SectionMarkers};

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Outcome of [`update_readme_table`].
#[derive(Debug, Clone)]
pub struct UpdateReadmeResult {
    /// Document that was rewritten.
    pub readme_path: PathBuf,
    /// Catalog rows rendered into the table.
    pub rows: usize,
    /// Marked sections replaced; 0 means the document was written back as is.
    pub sections_replaced: usize,
}

// ---------------------------------------------------------------------------
// Table generation
// ---------------------------------------------------------------------------

/// Render the CSV at `csv_path` as a Markdown table.
pub fn csv_to_md_table(csv_path: &Path) -> Result<String> {
    let table = startable_storage::load_table(csv_path)?;
    Ok(startable_markdown::render_table(&table))
}

// ---------------------------------------------------------------------------
// README update
// ---------------------------------------------------------------------------

/// Regenerate the table section of `readme_path` from `csv_path`.
///
/// 1. Read the README
/// 2. Render the table from the CSV
/// 3. Replace the marked section
/// 4. Write the README back (unchanged when no section matched)
#[instrument(skip_all, fields(readme = %readme_path.display(), csv = %csv_path.display()))]
pub fn update_readme_table(
    readme_path: &Path,
    csv_path: &Path,
    markers: &SectionMarkers,
) -> Result<UpdateReadmeResult> {
    info!("Reading current README file.");
    let content = startable_storage::read_text(readme_path)?;

    info!("Generating new table from CSV.");
    let table = startable_storage::load_table(csv_path)?;
    let rendered = startable_markdown::render_table(&table);

    info!("Updating README with new table.");
    let replacement = startable_markdown::replace_section(&content, &rendered, markers)?;
    if replacement.replaced == 0 {
        warn!(
            start = %markers.start_marker,
            end = %markers.end_marker,
            "table section markers not found, README left unchanged"
        );
    }

    startable_storage::write_text(readme_path, &replacement.content)?;
    info!("README file updated successfully.");

    Ok(UpdateReadmeResult {
        readme_path: readme_path.to_path_buf(),
        rows: table.rows.len(),
        sections_replaced: replacement.replaced,
    })
}
