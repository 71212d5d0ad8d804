//! Markdown rendering of the catalog table and README section splicing.
//!
//! [`render_table`] turns a [`CatalogTable`] into a centered Markdown table;
//! [`replace_section`] swaps that table into the marked region of a larger
//! document.

mod cleanup;
mod section;

use startable_shared::{CatalogRow, CatalogTable, LINKS_COLUMN, NAME_COLUMN, extract_main_link};
use tracing::{debug, instrument};

pub use cleanup::clean_html_formatting;
pub use section::{SectionReplacement, replace_section};

/// Alignment cell emitted once per column.
const CENTER_ALIGN: &str = ":---:";

// ---------------------------------------------------------------------------
// Row processing
// ---------------------------------------------------------------------------

/// Prepare a row for display.
///
/// When the row has a non-empty `links` cell, `name` is rewritten from the
/// canonical link: the name is substituted into the link text in place of
/// itself, so the cell ends up holding the canonical link verbatim (a
/// Markdown link renders clickable in the table). Then every cell is stripped
/// of inline HTML.
pub fn process_row(row: &mut CatalogRow) {
    let main_link = row
        .get(LINKS_COLUMN)
        .filter(|links| !links.is_empty())
        .map(extract_main_link);

    if let Some(main_link) = main_link.filter(|link| !link.is_empty()) {
        let linked = row
            .get(NAME_COLUMN)
            .map(|name| main_link.replace(name, name));
        if let Some(linked) = linked {
            row.set(NAME_COLUMN, linked);
        }
    }

    for value in row.values_mut() {
        *value = clean_html_formatting(value);
    }
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

fn table_line<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    format!("| {} |", cells.collect::<Vec<_>>().join(" | "))
}

/// Render the catalog as a Markdown table.
///
/// Output is the header line, an all-centered alignment line, then one line
/// per row in table order, each terminated by `\n`. Cells a row lacks are
/// rendered empty. The input table is not modified.
#[instrument(skip_all, fields(columns = table.headers.len(), rows = table.rows.len()))]
pub fn render_table(table: &CatalogTable) -> String {
    let header_row = table_line(table.headers.iter().map(String::as_str));
    let align_row = format!(
        "|{}|",
        vec![CENTER_ALIGN; table.headers.len()].join("|")
    );

    let data_rows: Vec<String> = table
        .rows
        .iter()
        .map(|row| {
            let mut row = row.clone();
            process_row(&mut row);
            table_line(table.ordered_cells(&row))
        })
        .collect();

    let rendered = if data_rows.is_empty() {
        format!("{header_row}\n{align_row}\n")
    } else {
        format!("{header_row}\n{align_row}\n{}\n", data_rows.join("\n"))
    };

    debug!(len = rendered.len(), "table rendered");
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[(&str, &str)]]) -> CatalogTable {
        CatalogTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|fields| fields.iter().copied().collect())
                .collect(),
        }
    }

    #[test]
    fn renders_two_tools() {
        let t = table(
            &["name", "summary", "interface"],
            &[
                &[("name", "Tool1"), ("summary", "Description1"), ("interface", "Interface1")],
                &[("name", "Tool2"), ("summary", "Description2"), ("interface", "Interface2")],
            ],
        );
        assert_eq!(
            render_table(&t),
            "| name | summary | interface |\n|:---:|:---:|:---:|\n| Tool1 | Description1 | Interface1 |\n| Tool2 | Description2 | Interface2 |\n"
        );
    }

    #[test]
    fn renders_empty_table() {
        let t = table(&["name", "summary", "interface"], &[]);
        assert_eq!(
            render_table(&t),
            "| name | summary | interface |\n|:---:|:---:|:---:|\n"
        );
    }

    #[test]
    fn missing_cells_render_empty() {
        let t = table(
            &["name", "summary", "interface"],
            &[
                &[("name", "Tool1"), ("summary", "Description1")],
                &[("name", "Tool2"), ("summary", "Description2"), ("interface", "Interface2")],
            ],
        );
        assert_eq!(
            render_table(&t),
            "| name | summary | interface |\n|:---:|:---:|:---:|\n| Tool1 | Description1 |  |\n| Tool2 | Description2 | Interface2 |\n"
        );
    }

    /// Rebuild a table from rendered Markdown (cells must not contain " | ").
    fn parse_rendered(rendered: &str) -> CatalogTable {
        let split = |line: &str| -> Vec<String> {
            line.trim_start_matches("| ")
                .trim_end_matches(" |")
                .split(" | ")
                .map(String::from)
                .collect()
        };
        let mut lines = rendered.lines();
        let headers = lines.next().map(split).unwrap_or_default();
        lines.next();
        let rows = lines
            .map(|line| headers.iter().cloned().zip(split(line)).collect())
            .collect();
        CatalogTable { headers, rows }
    }

    #[test]
    fn rerendering_rendered_output_is_identical() {
        let t = table(
            &["name", "links", "summary"],
            &[
                &[
                    ("name", "Tool1"),
                    ("links", "[Docs](https://d.io), [GitHub](https://github.com/o/r)"),
                    ("summary", "**fast** [docs](https://d.io)"),
                ],
                &[("name", "Tool2"), ("links", ""), ("summary", "plain")],
            ],
        );

        let first = render_table(&t);
        let reparsed = parse_rendered(&first);
        assert_eq!(reparsed.rows[0].cell("name"), "[GitHub](https://github.com/o/r)");
        assert_eq!(reparsed.rows[1].cell("name"), "Tool2");

        assert_eq!(render_table(&reparsed), first);
    }

    #[test]
    fn rendering_does_not_mutate_input() {
        let t = table(
            &["name", "links"],
            &[&[("name", "Tool"), ("links", "<b>https://github.com/o/r</b>")]],
        );
        let before = t.clone();
        render_table(&t);
        assert_eq!(t, before);
    }

    #[test]
    fn name_takes_canonical_link() {
        let mut row: CatalogRow = [
            ("name", "Test Tool"),
            ("links", "[Docs](https://docs.com), [GitHub](https://github.com/owner/repo)"),
        ]
        .into_iter()
        .collect();
        process_row(&mut row);
        assert_eq!(row.cell("name"), "[GitHub](https://github.com/owner/repo)");
    }

    #[test]
    fn name_kept_without_links() {
        let mut row: CatalogRow = [("name", "Tool"), ("links", "")].into_iter().collect();
        process_row(&mut row);
        assert_eq!(row.cell("name"), "Tool");

        let mut row: CatalogRow = [("name", "Tool")].into_iter().collect();
        process_row(&mut row);
        assert_eq!(row.cell("name"), "Tool");
    }

    #[test]
    fn html_cleaned_in_every_cell() {
        let mut row: CatalogRow = [
            ("name", "<i>Tool</i>"),
            ("interface", "CLI<br>Web"),
        ]
        .into_iter()
        .collect();
        process_row(&mut row);
        assert_eq!(row.cell("name"), "Tool");
        assert_eq!(row.cell("interface"), "CLI | Web");
    }
}
