//! HTTP implementation of the remote source

use async_trait::async_trait;
use metrics_core::{
    null_as_default, Branch, CommitListItem, CommitPage, FullCommit, ProjectDetail, ProjectSummary,
    RepositoryDetail, RepositorySummary, SourceClient, SourceError,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Connection settings of the remote source
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API root, e.g. `https://host/app/sourcecode/api/api/v2`
    pub base_url: Url,
    pub username: String,
    pub password: String,
    /// Accept invalid TLS certificates
    pub insecure: bool,
    /// Overall timeout for every request; `None` leaves requests unbounded
    pub request_timeout: Option<Duration>,
}

/// `{"data": ...}` wrapper used by every endpoint
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Default + Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    data: T,
}

#[derive(Deserialize, Default)]
struct PageInfo {
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Deserialize)]
struct CommitsEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    data: Vec<CommitListItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    page: PageInfo,
}

#[derive(Deserialize, Default)]
struct DiffContent {
    #[serde(default, deserialize_with = "null_as_default")]
    content: String,
}

fn transport(e: reqwest::Error) -> SourceError {
    SourceError::Transport(e.to_string())
}

/// Authenticated REST client for the code-hosting API
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: String,
    request_timeout: Option<Duration>,
}

impl RemoteClient {
    pub fn new(config: RemoteConfig) -> Result<Self, SourceError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("codemetrics/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(config.insecure);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(transport)?;

        if config.base_url.cannot_be_a_base() {
            return Err(SourceError::InvalidUrl(config.base_url.to_string()));
        }

        Ok(Self {
            http,
            base_url: config.base_url,
            username: config.username,
            password: config.password,
            request_timeout: config.request_timeout,
        })
    }

    fn request_error(&self, e: reqwest::Error) -> SourceError {
        match self.request_timeout {
            Some(timeout) if e.is_timeout() => SourceError::Timeout(timeout.as_secs()),
            _ => transport(e),
        }
    }

    /// Appends escaped path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
        log::trace!("GET {}", url);

        let response = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.request_error(e))?;

        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| SourceError::Decode(e.to_string()))
    }

    async fn get_data<T: DeserializeOwned + Default>(&self, url: Url) -> Result<T, SourceError> {
        let envelope: Envelope<T> = self.get(url).await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl SourceClient for RemoteClient {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, SourceError> {
        self.get_data(self.endpoint(&["projects"])?).await
    }

    async fn project_detail(&self, project: &str) -> Result<ProjectDetail, SourceError> {
        self.get_data(self.endpoint(&["projects", project])?).await
    }

    async fn list_repositories(
        &self,
        project: &str,
    ) -> Result<Vec<RepositorySummary>, SourceError> {
        self.get_data(self.endpoint(&["projects", project, "repos"])?)
            .await
    }

    async fn repository_detail(
        &self,
        project: &str,
        repo: &str,
    ) -> Result<RepositoryDetail, SourceError> {
        self.get_data(self.endpoint(&["projects", project, "repos", repo])?)
            .await
    }

    async fn list_branches(&self, project: &str, repo: &str) -> Result<Vec<Branch>, SourceError> {
        self.get_data(self.endpoint(&["projects", project, "repos", repo, "branches"])?)
            .await
    }

    async fn commits_page(
        &self,
        project: &str,
        repo: &str,
        branch: &str,
        cursor: &str,
    ) -> Result<CommitPage, SourceError> {
        let mut url = self.endpoint(&["projects", project, "repos", repo, "commits"])?;
        {
            let mut query = url.query_pairs_mut();
            if !branch.is_empty() {
                query.append_pair("rev", branch);
            }
            if !cursor.is_empty() {
                query.append_pair("cursor", cursor);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        let envelope: CommitsEnvelope = self.get(url).await?;
        Ok(CommitPage {
            items: envelope.data,
            next_cursor: envelope.page.next_cursor,
        })
    }

    async fn full_commit(
        &self,
        project: &str,
        repo: &str,
        hash: &str,
    ) -> Result<FullCommit, SourceError> {
        self.get_data(self.endpoint(&["projects", project, "repos", repo, "commits", hash])?)
            .await
    }

    async fn commit_diff(
        &self,
        project: &str,
        repo: &str,
        hash: &str,
    ) -> Result<String, SourceError> {
        let url = self.endpoint(&["projects", project, "repos", repo, "commits", hash, "diff"])?;
        let diff: DiffContent = self.get_data(url).await?;
        Ok(diff.content)
    }
}
