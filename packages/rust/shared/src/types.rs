//! Core domain types for the catalog table.

use std::collections::HashMap;

/// Column holding the display name of an entry.
pub const NAME_COLUMN: &str = "name";

/// Column holding the comma-separated link list of an entry.
pub const LINKS_COLUMN: &str = "links";

/// Column written by star enrichment.
pub const STARS_COLUMN: &str = "github_stars";

/// Value stored in [`STARS_COLUMN`] when no star count could be obtained.
pub const NOT_AVAILABLE: &str = "N/A";

/// Domain whose links identify a repository on the hosting platform.
pub const HOSTING_DOMAIN: &str = "github.com";

// ---------------------------------------------------------------------------
// CatalogRow
// ---------------------------------------------------------------------------

/// One catalog entry: column name to cell value.
///
/// Rows loaded from a short CSV record simply lack the trailing keys;
/// readers treat a missing key as an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
    fields: HashMap<String, String>,
}

impl CatalogRow {
    /// Value of `column`, if the row has it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of `column`, or `""` when absent.
    pub fn cell(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Set `column` to `value`, replacing any previous value.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Whether the row has a value for `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Mutable access to every cell value.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.fields.values_mut()
    }
}

impl<K, V> FromIterator<(K, V)> for CatalogRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// CatalogTable
// ---------------------------------------------------------------------------

/// The whole catalog: header order plus rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogTable {
    /// Column names in header order.
    pub headers: Vec<String>,
    /// Rows in load order.
    pub rows: Vec<CatalogRow>,
}

impl CatalogTable {
    /// Create a table with the given headers and no rows.
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append `column` to the header unless it is already present.
    ///
    /// Returns `true` when the column was added.
    pub fn ensure_column(&mut self, column: &str) -> bool {
        if self.headers.iter().any(|h| h == column) {
            return false;
        }
        self.headers.push(column.to_string());
        true
    }

    /// Cells of `row` in header order, empty where the row lacks a column.
    pub fn ordered_cells<'a>(&'a self, row: &'a CatalogRow) -> impl Iterator<Item = &'a str> {
        self.headers.iter().map(move |h| row.cell(h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cells_read_as_empty() {
        let row: CatalogRow = [("name", "Tool1")].into_iter().collect();
        assert_eq!(row.cell("name"), "Tool1");
        assert_eq!(row.cell("links"), "");
        assert!(row.get("links").is_none());
    }

    #[test]
    fn ensure_column_appends_once() {
        let mut table = CatalogTable::new(vec!["name".into(), "links".into()]);
        assert!(table.ensure_column(STARS_COLUMN));
        assert!(!table.ensure_column(STARS_COLUMN));
        assert_eq!(table.headers, vec!["name", "links", "github_stars"]);
    }

    #[test]
    fn ordered_cells_follow_header() {
        let table = CatalogTable::new(vec!["a".into(), "b".into(), "c".into()]);
        let row: CatalogRow = [("c", "3"), ("a", "1")].into_iter().collect();
        let cells: Vec<&str> = table.ordered_cells(&row).collect();
        assert_eq!(cells, vec!["1", "", "3"]);
    }
}
