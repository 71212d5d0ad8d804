//! GitHub repository metadata lookups.
//!
//! [`GitHubClient`] issues one `GET {api_base}/repos/{owner}/{repo}` per
//! repository and extracts `stargazers_count`. There are no retries and no
//! pagination; each lookup is a single attempt whose failure is reported to
//! the caller as an error value.

mod repo;

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use startable_shared::{Result, StarsConfig, StartableError};
use tracing::{debug, instrument};

pub use repo::RepoRef;

/// Media type requested from the REST API.
const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// User-Agent string for API requests (GitHub rejects requests without one).
const USER_AGENT: &str = concat!("startable/", env!("CARGO_PKG_VERSION"));

/// The subset of the repository payload we read.
#[derive(Debug, Deserialize)]
struct RepoMetadata {
    stargazers_count: Option<u64>,
}

// ---------------------------------------------------------------------------
// GitHubClient
// ---------------------------------------------------------------------------

/// HTTP session for repository lookups.
///
/// Cloning is cheap and shares the underlying connection pool; the pool is
/// released when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: String,
}

impl GitHubClient {
    /// Build a client from the runtime stars configuration.
    ///
    /// The token, when present, is attached to every request as
    /// `Authorization: token <value>`.
    pub fn new(config: &StarsConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_V3));

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("token {token}")).map_err(|_| {
                StartableError::config("GitHub token contains characters not allowed in a header")
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers);

        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| StartableError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: config.api_base.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Metadata endpoint for `repo`.
    pub fn repo_url(&self, repo: &RepoRef) -> String {
        format!("{}/repos/{}/{}", self.api_base, repo.owner, repo.repo)
    }

    /// Fetch the stargazer count of `repo`.
    ///
    /// - transport failure → [`StartableError::Network`]
    /// - any status other than 200 → [`StartableError::Api`]
    /// - unreadable body or missing `stargazers_count` → [`StartableError::Parse`]
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn stargazers(&self, repo: &RepoRef) -> Result<u64> {
        let url = self.repo_url(repo);
        debug!(%url, "fetching repository metadata");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StartableError::Network(format!("{repo}: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(StartableError::Api {
                status: status.as_u16(),
                message: repo.to_string(),
            });
        }

        let metadata: RepoMetadata = response
            .json()
            .await
            .map_err(|e| StartableError::parse(format!("{repo}: invalid response body: {e}")))?;

        metadata.stargazers_count.ok_or_else(|| {
            StartableError::parse(format!("{repo}: response has no stargazers_count"))
        })
    }
}
