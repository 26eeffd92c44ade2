//! Core data models for the collector

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::diff::DiffStats;

/// Surrogate identifier assigned by the store
pub type RowId = i64;

/// Decodes an explicit JSON `null` as the type's default value.
///
/// Pair with `#[serde(default)]` so absent keys get the same treatment.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Project entry from the project listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Full project record as returned by the remote source
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectDetail {
    /// Unique project key
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Repository entry from a project's repository listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositorySummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Repository detail as returned by the remote source
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

impl RepositoryDetail {
    /// Degraded detail used when the detail request fails
    pub fn name_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }
}

/// Branch of a repository. Never persisted on its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Branch {
    /// Synthetic branch used when the branch list cannot be fetched
    pub fn head() -> Self {
        Self {
            name: "HEAD".to_string(),
        }
    }
}

/// Item of a commit listing page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitListItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hash: String,
}

/// One page of a commit listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitPage {
    pub items: Vec<CommitListItem>,

    /// Cursor of the following page; `None` or empty when exhausted
    pub next_cursor: Option<String>,
}

impl CommitPage {
    /// Returns the next cursor, treating an empty string as exhaustion
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// Commit author as reported by the remote source
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Author {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

impl Author {
    pub const UNKNOWN_NAME: &'static str = "Unknown";
    pub const UNKNOWN_EMAIL: &'static str = "unknown@example.com";

    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Sentinel identity for commits without any author information
    pub fn unknown() -> Self {
        Self::new(Self::UNKNOWN_NAME, Self::UNKNOWN_EMAIL)
    }

    /// True when neither name nor email is populated
    pub fn is_absent(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }

    /// Substitutes the sentinel only when both fields are empty.
    ///
    /// A partially populated author is kept as-is: `{"Alice", ""}` stays
    /// `{"Alice", ""}`.
    pub fn normalized(self) -> Self {
        if self.is_absent() {
            Self::unknown()
        } else {
            self
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Full commit metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FullCommit {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hash: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub author: Author,

    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Commit with normalized author and diff statistics, ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommit {
    pub hash: String,
    pub author: Author,
    pub message: String,
    pub created_at: Option<DateTime<Utc>>,
    pub stats: DiffStats,
}

impl ResolvedCommit {
    /// Links the resolved commit to its parents for insertion
    pub fn into_row(
        self,
        branch_name: &str,
        developer_id: RowId,
        project_id: RowId,
        repository_id: RowId,
    ) -> NewCommit {
        NewCommit {
            hash: self.hash,
            message: self.message,
            created_at: self.created_at,
            branch_name: branch_name.to_string(),
            lines_added: self.stats.added,
            lines_deleted: self.stats.deleted,
            developer_id,
            project_id,
            repository_id,
        }
    }
}

/// Commit row as written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommit {
    /// Unique key; a hash is written at most once
    pub hash: String,
    pub message: String,
    pub created_at: Option<DateTime<Utc>>,
    /// Branch the commit was first discovered on
    pub branch_name: String,
    pub lines_added: u64,
    pub lines_deleted: u64,
    pub developer_id: RowId,
    pub project_id: RowId,
    pub repository_id: RowId,
}

impl fmt::Display for NewCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.hash.get(..8).unwrap_or(&self.hash);
        write!(
            f,
            "{} on {} (+{} -{})",
            short, self.branch_name, self.lines_added, self.lines_deleted
        )
    }
}
