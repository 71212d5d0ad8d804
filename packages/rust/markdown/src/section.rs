//! Splicing the generated table into a larger document.
//!
//! The table lives between a start marker (a heading) and an end marker
//! (a footnote line). Everything from the start marker through the end
//! marker is replaced; the rest of the document is left byte-identical.

use regex::{Captures, Regex};
use startable_shared::{Result, SectionMarkers, StartableError};
use tracing::debug;

/// Outcome of [`replace_section`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReplacement {
    /// The document with every marked section replaced.
    pub content: String,
    /// Number of sections replaced; 0 means `content` equals the input.
    pub replaced: usize,
}

/// Build the section pattern.
///
/// Both markers are matched literally. The end marker may be preceded by a
/// Markdown escape backslash (`\* Free ...`), which is kept in the capture so
/// the marker is written back exactly as it appeared.
fn section_regex(markers: &SectionMarkers) -> Result<Regex> {
    let pattern = format!(
        r"(?s){}.*?(\\?{})",
        regex::escape(&markers.start_marker),
        regex::escape(&markers.end_marker)
    );
    Regex::new(&pattern)
        .map_err(|e| StartableError::validation(format!("invalid section markers: {e}")))
}

/// Replace each `start ... end` span of `content` with
/// `start`, a blank line, `table`, a newline, and the end marker as matched.
///
/// A document without the markers is returned unchanged with
/// `replaced == 0`; that is not an error.
pub fn replace_section(
    content: &str,
    table: &str,
    markers: &SectionMarkers,
) -> Result<SectionReplacement> {
    let re = section_regex(markers)?;

    let replaced = re.find_iter(content).count();
    if replaced == 0 {
        return Ok(SectionReplacement {
            content: content.to_string(),
            replaced,
        });
    }

    let start = &markers.start_marker;
    let content = re
        .replace_all(content, |caps: &Captures| {
            format!("{start}\n\n{table}\n{}", &caps[1])
        })
        .into_owned();

    debug!(replaced, "section replaced");
    Ok(SectionReplacement { content, replaced })
}
