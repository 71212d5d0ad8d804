//! Inline HTML cleanup for table cells.
//!
//! Catalog cells sometimes carry HTML for layout (`<br>` line breaks,
//! `<b>`, `<img>`...). A Markdown table cell must stay on one line, so
//! breaks become a visible ` | ` separator and every other tag is dropped.
//! Markdown syntax is left alone.

use std::sync::LazyLock;

use regex::Regex;

/// Separator substituted for `<br>` inside a cell.
const BREAK_SEPARATOR: &str = " | ";

/// Matches `<br>`, `<br/>`, `<br />` in any case.
static BR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>").expect("valid regex")
});

/// Matches any remaining tag.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]+>").expect("valid regex")
});

/// Strip HTML from a cell: breaks become ` | `, other tags vanish.
pub fn clean_html_formatting(text: &str) -> String {
    let text = BR_RE.replace_all(text, BREAK_SEPARATOR);
    TAG_RE.replace_all(&text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn br_becomes_separator() {
        assert_eq!(clean_html_formatting("CLI<br>Web"), "CLI | Web");
        assert_eq!(clean_html_formatting("CLI<br/>Web<BR />API"), "CLI | Web | API");
    }

    #[test]
    fn other_tags_removed() {
        assert_eq!(
            clean_html_formatting("<b>Bold</b> and <img src=\"x.png\">"),
            "Bold and "
        );
    }

    #[test]
    fn markdown_untouched() {
        let md = "[GitHub](https://github.com/o/r) **fast** `code`";
        assert_eq!(clean_html_formatting(md), md);
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(clean_html_formatting("Description1"), "Description1");
        assert_eq!(clean_html_formatting(""), "");
    }
}
