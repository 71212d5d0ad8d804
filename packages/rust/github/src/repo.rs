//! Repository references embedded in free-form link text.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Matches `github.com/<owner>/<repo>`; each segment stops at the next `/`.
static REPO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com/([^/]+)/([^/]+)").expect("repo regex")
});

/// An `owner/repo` pair on the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Extract the repository from anything containing
    /// `github.com/<owner>/<repo>`.
    ///
    /// Returns `None` for empty text, other hosts, or a URL with only an
    /// owner segment (`https://github.com/invalid`).
    pub fn parse(text: &str) -> Option<Self> {
        let caps = REPO_RE.captures(text)?;
        Some(Self {
            owner: caps[1].to_string(),
            repo: caps[2].to_string(),
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_url() {
        let repo = RepoRef::parse("https://github.com/owner/repo").unwrap();
        assert_eq!(repo.owner, "owner");
        assert_eq!(repo.repo, "repo");
        assert_eq!(repo.to_string(), "owner/repo");
    }

    #[test]
    fn parses_deep_url() {
        let repo = RepoRef::parse("https://github.com/owner/repo/tree/main/docs").unwrap();
        assert_eq!(repo.to_string(), "owner/repo");
    }

    #[test]
    fn parses_stripped_markdown_link() {
        let repo = RepoRef::parse("GitHub](https://github.com/owner/repo").unwrap();
        assert_eq!(repo.to_string(), "owner/repo");
    }

    #[test]
    fn rejects_other_shapes() {
        assert_eq!(RepoRef::parse("https://example.com"), None);
        assert_eq!(RepoRef::parse("https://github.com/invalid"), None);
        assert_eq!(RepoRef::parse(""), None);
    }
}
