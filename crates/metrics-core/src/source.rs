//! Remote source seam

use async_trait::async_trait;

use crate::error::SourceError;
use crate::models::{
    Branch, CommitPage, FullCommit, ProjectDetail, ProjectSummary, RepositoryDetail,
    RepositorySummary,
};

/// Read access to a remote code-hosting service.
///
/// Every call returns decoded data or a `SourceError`. Implementations own
/// transport, authentication and payload decoding; callers decide what a
/// failure means for their unit of work.
#[async_trait]
pub trait SourceClient: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, SourceError>;

    async fn project_detail(&self, project: &str) -> Result<ProjectDetail, SourceError>;

    async fn list_repositories(&self, project: &str)
        -> Result<Vec<RepositorySummary>, SourceError>;

    async fn repository_detail(
        &self,
        project: &str,
        repo: &str,
    ) -> Result<RepositoryDetail, SourceError>;

    async fn list_branches(&self, project: &str, repo: &str) -> Result<Vec<Branch>, SourceError>;

    /// Fetches one page of the commit listing. An empty cursor requests the
    /// first page.
    async fn commits_page(
        &self,
        project: &str,
        repo: &str,
        branch: &str,
        cursor: &str,
    ) -> Result<CommitPage, SourceError>;

    async fn full_commit(
        &self,
        project: &str,
        repo: &str,
        hash: &str,
    ) -> Result<FullCommit, SourceError>;

    /// Returns the diff of a commit, base64-encoded as delivered by the source
    async fn commit_diff(&self, project: &str, repo: &str, hash: &str)
        -> Result<String, SourceError>;
}
