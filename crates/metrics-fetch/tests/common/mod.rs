//! Scripted in-memory source used by the pipeline tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use data_encoding::BASE64;
use metrics_core::{
    Author, Branch, CommitListItem, CommitPage, FullCommit, ProjectDetail, ProjectSummary,
    RepositoryDetail, RepositorySummary, SourceClient, SourceError,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type RepoKey = (String, String);
type BranchKey = (String, String, String);

fn key2(a: &str, b: &str) -> RepoKey {
    (a.to_string(), b.to_string())
}

fn key3(a: &str, b: &str, c: &str) -> BranchKey {
    (a.to_string(), b.to_string(), c.to_string())
}

fn unavailable(what: impl Into<String>) -> SourceError {
    SourceError::Status {
        status: 503,
        body: what.into(),
    }
}

/// One scripted page: hashes, or a failing request
pub type PageScript = Option<Vec<&'static str>>;

/// Remote source whose every answer is scripted up front.
///
/// Missing entries answer with an HTTP 503, so tests only script what
/// they expect to succeed.
#[derive(Default)]
pub struct FakeSource {
    projects: Vec<ProjectDetail>,
    repositories: HashMap<String, Vec<RepositoryDetail>>,
    failing_repo_details: HashSet<RepoKey>,
    branches: HashMap<RepoKey, Vec<Branch>>,
    pages: HashMap<BranchKey, Vec<PageScript>>,
    commits: HashMap<String, FullCommit>,
    diffs: HashMap<String, String>,
    slow_commits: HashMap<String, Duration>,
    page_delay: Option<Duration>,
    pub page_requests: AtomicUsize,
    pub commit_requests: AtomicUsize,
    /// Commit listing requests in flight
    pub active_walks: AtomicUsize,
    /// Highest value `active_walks` reached
    pub peak_walks: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(mut self, name: &str, description: &str) -> Self {
        self.projects.push(ProjectDetail {
            name: name.to_string(),
            full_name: format!("{} project", name),
            description: description.to_string(),
            created_at: Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()),
            updated_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        });
        self
    }

    pub fn repository(mut self, project: &str, name: &str, description: &str) -> Self {
        self.repositories
            .entry(project.to_string())
            .or_default()
            .push(RepositoryDetail {
                name: name.to_string(),
                description: description.to_string(),
            });
        self
    }

    /// Lists the repository but fails its detail request
    pub fn failing_repository_detail(mut self, project: &str, name: &str) -> Self {
        self.failing_repo_details.insert(key2(project, name));
        self.repository(project, name, "unreachable")
    }

    pub fn branches(mut self, project: &str, repo: &str, names: &[&str]) -> Self {
        self.branches.insert(
            key2(project, repo),
            names
                .iter()
                .map(|n| Branch {
                    name: n.to_string(),
                })
                .collect(),
        );
        self
    }

    /// Scripts the commit listing of a branch, one entry per page
    pub fn pages(mut self, project: &str, repo: &str, branch: &str, pages: Vec<PageScript>) -> Self {
        self.pages.insert(key3(project, repo, branch), pages);
        self
    }

    /// Registers a resolvable commit with a diff of `added` and `deleted` lines
    pub fn commit(mut self, hash: &str, author: Author, added: usize, deleted: usize) -> Self {
        let mut diff = String::from("--- a/file\n+++ b/file\n@@ -1 +1 @@\n");
        for i in 0..added {
            diff.push_str(&format!("+new line {}\n", i));
        }
        for i in 0..deleted {
            diff.push_str(&format!("-old line {}\n", i));
        }
        self.commits.insert(
            hash.to_string(),
            FullCommit {
                hash: hash.to_string(),
                author,
                message: format!("message of {}", hash),
                created_at: Some(Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap()),
            },
        );
        self.diffs.insert(hash.to_string(), BASE64.encode(diff.as_bytes()));
        self
    }

    /// Registers commit metadata whose diff payload is not base64
    pub fn commit_with_raw_diff(mut self, hash: &str, raw: &str) -> Self {
        self = self.commit(hash, Author::new("dev", "dev@example.com"), 0, 0);
        self.diffs.insert(hash.to_string(), raw.to_string());
        self
    }

    /// Registers commit metadata without a diff
    pub fn commit_without_diff(mut self, hash: &str) -> Self {
        self = self.commit(hash, Author::new("dev", "dev@example.com"), 0, 0);
        self.diffs.remove(hash);
        self
    }

    /// Delays every commit listing answer by `delay`
    pub fn page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = Some(delay);
        self
    }

    /// Delays the full-commit answer for `hash`
    pub fn slow_commit(mut self, hash: &str, delay: Duration) -> Self {
        self.slow_commits.insert(hash.to_string(), delay);
        self
    }
}

#[async_trait]
impl SourceClient for FakeSource {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, SourceError> {
        Ok(self
            .projects
            .iter()
            .map(|p| ProjectSummary {
                name: p.name.clone(),
            })
            .collect())
    }

    async fn project_detail(&self, project: &str) -> Result<ProjectDetail, SourceError> {
        self.projects
            .iter()
            .find(|p| p.name == project)
            .cloned()
            .ok_or_else(|| unavailable(format!("project {}", project)))
    }

    async fn list_repositories(
        &self,
        project: &str,
    ) -> Result<Vec<RepositorySummary>, SourceError> {
        let repos = self
            .repositories
            .get(project)
            .ok_or_else(|| unavailable(format!("repos of {}", project)))?;
        Ok(repos
            .iter()
            .map(|r| RepositorySummary {
                name: r.name.clone(),
            })
            .collect())
    }

    async fn repository_detail(
        &self,
        project: &str,
        repo: &str,
    ) -> Result<RepositoryDetail, SourceError> {
        if self.failing_repo_details.contains(&key2(project, repo)) {
            return Err(unavailable(format!("repo {}/{}", project, repo)));
        }
        self.repositories
            .get(project)
            .and_then(|repos| repos.iter().find(|r| r.name == repo))
            .cloned()
            .ok_or_else(|| unavailable(format!("repo {}/{}", project, repo)))
    }

    async fn list_branches(&self, project: &str, repo: &str) -> Result<Vec<Branch>, SourceError> {
        self.branches
            .get(&key2(project, repo))
            .cloned()
            .ok_or_else(|| unavailable(format!("branches of {}/{}", project, repo)))
    }

    async fn commits_page(
        &self,
        project: &str,
        repo: &str,
        branch: &str,
        cursor: &str,
    ) -> Result<CommitPage, SourceError> {
        self.page_requests.fetch_add(1, Ordering::SeqCst);

        let active = self.active_walks.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_walks.fetch_max(active, Ordering::SeqCst);
        if let Some(delay) = self.page_delay {
            tokio::time::sleep(delay).await;
        }
        self.active_walks.fetch_sub(1, Ordering::SeqCst);

        let pages = self
            .pages
            .get(&key3(project, repo, branch))
            .ok_or_else(|| unavailable(format!("commits of {}", branch)))?;

        let index = if cursor.is_empty() {
            0
        } else {
            cursor
                .strip_prefix('p')
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| SourceError::Decode(format!("bad cursor {}", cursor)))?
        };

        let hashes = pages
            .get(index)
            .cloned()
            .flatten()
            .ok_or_else(|| unavailable(format!("page {} of {}", index, branch)))?;

        let next_cursor = if index + 1 < pages.len() {
            Some(format!("p{}", index + 1))
        } else {
            Some(String::new())
        };

        Ok(CommitPage {
            items: hashes
                .into_iter()
                .map(|h| CommitListItem {
                    hash: h.to_string(),
                })
                .collect(),
            next_cursor,
        })
    }

    async fn full_commit(
        &self,
        _project: &str,
        _repo: &str,
        hash: &str,
    ) -> Result<FullCommit, SourceError> {
        self.commit_requests.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.slow_commits.get(hash) {
            tokio::time::sleep(*delay).await;
        }
        self.commits
            .get(hash)
            .cloned()
            .ok_or_else(|| unavailable(format!("commit {}", hash)))
    }

    async fn commit_diff(
        &self,
        _project: &str,
        _repo: &str,
        hash: &str,
    ) -> Result<String, SourceError> {
        self.diffs
            .get(hash)
            .cloned()
            .ok_or_else(|| unavailable(format!("diff {}", hash)))
    }
}
