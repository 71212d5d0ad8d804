//! Link-list helpers for the `links` column.
//!
//! A link field is free text: comma-separated Markdown links
//! (`[label](url)`) or bare URLs. Nothing here parses URLs strictly; a
//! segment "is" a hosting link when it contains [`HOSTING_DOMAIN`],
//! ignoring case.

use crate::types::HOSTING_DOMAIN;

/// Characters stripped from both ends of a hosting link segment.
const LINK_DECORATION: &[char] = &['[', ']', '(', ')', ' '];

fn is_hosting_link(segment: &str) -> bool {
    segment.to_lowercase().contains(HOSTING_DOMAIN)
}

/// Pick the canonical link of an entry.
///
/// Returns the first trimmed segment that points at the hosting platform,
/// else the first segment, else `""`.
pub fn extract_main_link(links: &str) -> String {
    let segments: Vec<&str> = links.split(',').map(str::trim).collect();

    segments
        .iter()
        .find(|segment| is_hosting_link(segment))
        .or_else(|| segments.first())
        .map(|segment| segment.to_string())
        .unwrap_or_default()
}

/// First hosting-platform link in `links`, stripped of Markdown brackets,
/// parentheses and spaces at both ends.
///
/// `"[GitHub](https://github.com/owner/repo)"` yields
/// `"GitHub](https://github.com/owner/repo"`, which still carries the
/// `github.com/<owner>/<repo>` shape the repository parser looks for.
pub fn hosted_link(links: &str) -> Option<&str> {
    links
        .split(',')
        .find(|segment| is_hosting_link(segment))
        .map(|segment| segment.trim_matches(LINK_DECORATION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_hosting_link() {
        let links = "[Docs](https://docs.com), [GitHub](https://github.com/owner/repo)";
        assert_eq!(
            extract_main_link(links),
            "[GitHub](https://github.com/owner/repo)"
        );
    }

    #[test]
    fn falls_back_to_first_segment() {
        let links = "  [Docs](https://docs.com) , [Site](https://example.com)";
        assert_eq!(extract_main_link(links), "[Docs](https://docs.com)");
    }

    #[test]
    fn first_hosting_match_wins() {
        let links = "https://GitHub.com/a/one, https://github.com/b/two";
        assert_eq!(extract_main_link(links), "https://GitHub.com/a/one");
    }

    #[test]
    fn empty_input_gives_empty_link() {
        assert_eq!(extract_main_link(""), "");
        assert_eq!(extract_main_link("   "), "");
    }

    #[test]
    fn result_is_always_a_trimmed_segment() {
        let inputs = [
            "a, b, c",
            " x ,github.com/o/r , y",
            ",,",
            "[A](https://a.io)",
        ];
        for input in inputs {
            let segments: Vec<&str> = input.split(',').map(str::trim).collect();
            let main = extract_main_link(input);
            assert!(segments.contains(&main.as_str()), "{input:?} -> {main:?}");
        }
    }

    #[test]
    fn hosted_link_strips_decoration() {
        let links = "[Docs](https://docs.com), [GitHub](https://github.com/owner/repo)";
        assert_eq!(
            hosted_link(links),
            Some("GitHub](https://github.com/owner/repo")
        );
    }

    #[test]
    fn hosted_link_absent() {
        assert_eq!(hosted_link("[Docs](https://docs.com)"), None);
        assert_eq!(hosted_link(""), None);
    }
}
