//! Flat-file persistence for the catalog CSV and the target document.
//!
//! The CSV is the only store: it is read whole at the start of a pipeline
//! and rewritten whole at the end. There is no locking; a single writer is
//! assumed.
//!
//! Every I/O failure goes through [`StartableError::io`], so a missing file
//! surfaces as `NotFound` and an unreadable or unwritable one as
//! `PermissionDenied`.

use std::fs::File;
use std::path::Path;

use startable_shared::{CatalogRow, CatalogTable, Result, StartableError};
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// Catalog CSV
// ---------------------------------------------------------------------------

/// Load the catalog table from the CSV at `path`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_table(path: &Path) -> Result<CatalogTable> {
    let content = read_text(path)?;
    let table = parse_table(&content, path)?;
    debug!(
        columns = table.headers.len(),
        rows = table.rows.len(),
        "catalog loaded"
    );
    Ok(table)
}

/// Parse catalog CSV text. `origin` is only used for error messages.
///
/// Short records keep only the columns they have. Fields beyond the header
/// have no column name and are dropped.
pub fn parse_table(content: &str, origin: &Path) -> Result<CatalogTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(origin, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut table = CatalogTable::new(headers);

    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| csv_error(origin, e))?;

        if record.len() > table.headers.len() {
            debug!(
                row = index + 1,
                fields = record.len(),
                columns = table.headers.len(),
                "dropping fields beyond the header"
            );
        }

        let row: CatalogRow = table
            .headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.as_str(), value))
            .collect();
        table.rows.push(row);
    }

    Ok(table)
}

/// Write the catalog table to `path`, replacing its contents.
///
/// Columns follow header order; cells a row lacks are written empty.
/// Records end with `\n`.
#[instrument(skip_all, fields(path = %path.display(), rows = table.rows.len()))]
pub fn save_table(path: &Path, table: &CatalogTable) -> Result<()> {
    let file = File::create(path).map_err(|e| StartableError::io(path, e))?;

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    writer
        .write_record(&table.headers)
        .map_err(|e| csv_error(path, e))?;

    for row in &table.rows {
        writer
            .write_record(table.ordered_cells(row))
            .map_err(|e| csv_error(path, e))?;
    }

    writer.flush().map_err(|e| StartableError::io(path, e))?;
    debug!("catalog written");
    Ok(())
}

/// Map a `csv` error, keeping I/O failures classified by kind.
fn csv_error(path: &Path, err: csv::Error) -> StartableError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => StartableError::io(path, source),
        _ => StartableError::csv(path, message),
    }
}

// ---------------------------------------------------------------------------
// Whole-file text I/O
// ---------------------------------------------------------------------------

/// Read a UTF-8 text file whole.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| StartableError::io(path, e))
}

/// Replace the contents of `path` with `content`.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| StartableError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SAMPLE: &str = "\
name,links,github_stars
Test Tool,[GitHub](https://github.com/owner/repo),0
";

    fn origin() -> PathBuf {
        PathBuf::from("test.csv")
    }

    #[test]
    fn parse_sample() {
        let table = parse_table(SAMPLE, &origin()).unwrap();
        assert_eq!(table.headers, vec!["name", "links", "github_stars"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cell("name"), "Test Tool");
        assert_eq!(
            table.rows[0].cell("links"),
            "[GitHub](https://github.com/owner/repo)"
        );
    }

    #[test]
    fn parse_header_only() {
        let table = parse_table("name,summary,interface\n", &origin()).unwrap();
        assert_eq!(table.headers.len(), 3);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn parse_ragged_rows() {
        let csv = "\
name,summary,interface
Tool1,Description1
Tool2,Description2,Interface2,ExtraColumn
";
        let table = parse_table(csv, &origin()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert!(!table.rows[0].contains("interface"));
        assert_eq!(table.rows[1].cell("interface"), "Interface2");
        assert_eq!(table.rows[1].cell("name"), "Tool2");
        assert_eq!(table.rows[1].cell("summary"), "Description2");
        assert!(!table.rows[1].contains("ExtraColumn"));
    }

    #[test]
    fn parse_quoted_links() {
        let csv = "name,links\nTool,\"[Docs](https://docs.com), [GitHub](https://github.com/o/r)\"\n";
        let table = parse_table(csv, &origin()).unwrap();
        assert_eq!(
            table.rows[0].cell("links"),
            "[Docs](https://docs.com), [GitHub](https://github.com/o/r)"
        );
    }

    #[test]
    fn save_then_load_preserves_order_and_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");

        let mut table = parse_table(
            "name,links\nB,\"[x](https://x.io), [y](https://y.io)\"\nA,\n",
            &origin(),
        )
        .unwrap();
        table.ensure_column("github_stars");
        table.rows[0].set("github_stars", "42");

        save_table(&path, &table).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "name,links,github_stars\nB,\"[x](https://x.io), [y](https://y.io)\",42\nA,,\n"
        );

        let reloaded = load_table(&path).unwrap();
        assert_eq!(reloaded.rows[0].cell("name"), "B");
        assert_eq!(reloaded.rows[1].cell("name"), "A");
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let err = load_table(Path::new("nonexistent.csv")).unwrap_err();
        assert!(matches!(err, StartableError::NotFound { .. }));
    }

    #[test]
    fn save_into_missing_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("table.csv");
        let err = save_table(&path, &CatalogTable::default()).unwrap_err();
        assert!(matches!(err, StartableError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "# Title\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file modes; nothing to check there.
        if std::fs::read(&path).is_ok() {
            return;
        }

        let err = read_text(&path).unwrap_err();
        assert!(matches!(err, StartableError::PermissionDenied { .. }));
        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, StartableError::PermissionDenied { .. }));
    }

    #[test]
    fn text_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        write_text(&path, "# Title\n").unwrap();
        assert_eq!(read_text(&path).unwrap(), "# Title\n");
    }
}
