//! Read-side models and developer KPI scoring

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::RowId;

/// Commits touching at most this many lines count as small
pub const SMALL_COMMIT_MAX_LINES: u64 = 5;

/// Commits touching at least this many lines count as large
pub const LARGE_COMMIT_MIN_LINES: u64 = 50;

/// Project row as stored
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StoredProject {
    pub id: RowId,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Repository row as stored
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StoredRepository {
    pub id: RowId,
    pub project_id: RowId,
    pub name: String,
    pub description: String,
    pub active_branches: u64,
}

/// Developer who committed to a repository
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeveloperActivity {
    pub id: RowId,
    pub name: String,
    pub email: String,
    pub last_commit_at: Option<DateTime<Utc>>,
}

/// Aggregated commit metrics of one developer within one repository
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DeveloperMetrics {
    pub total_commits: u64,
    pub lines_added: u64,
    pub lines_deleted: u64,
    pub small_commits: u64,
    pub large_commits: u64,
    pub first_commit_at: Option<DateTime<Utc>>,
    pub last_commit_at: Option<DateTime<Utc>>,
}

impl DeveloperMetrics {
    /// Commits that are neither small nor large
    pub fn normal_commits(&self) -> u64 {
        self.total_commits
            .saturating_sub(self.small_commits)
            .saturating_sub(self.large_commits)
    }

    pub fn commit_frequency(&self) -> f64 {
        commit_frequency(self.total_commits, self.first_commit_at, self.last_commit_at)
    }
}

/// Repository-wide maxima used to normalize developer metrics
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RepositoryMaxima {
    pub commits: u64,
    pub lines_added: u64,
    pub lines_deleted: u64,
    pub small_commits: u64,
    pub large_commits: u64,
    /// Days between the first and last commit of the repository
    pub commit_frequency: f64,
}

/// Developer statistics within a repository, including the KPI score
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeveloperReport {
    pub id: RowId,
    pub name: String,
    pub email: String,
    pub metrics: DeveloperMetrics,
    pub commit_frequency: f64,
    pub kpi: f64,
}

/// Commits per day between the first and last commit.
///
/// The day span is clamped to at least one day.
pub fn commit_frequency(
    total_commits: u64,
    first: Option<DateTime<Utc>>,
    last: Option<DateTime<Utc>>,
) -> f64 {
    match (first, last) {
        (Some(first), Some(last)) => {
            let days = (last - first).num_days().max(1);
            total_commits as f64 / days as f64
        }
        _ => 0.0,
    }
}

fn ratio(value: f64, max: f64) -> f64 {
    (value / max.max(1.0)).min(1.0)
}

/// Weighted developer score in `[0, 1]`.
///
/// Every metric is divided by its repository maximum (denominator clamped to
/// at least 1) and capped at 1 before weighting.
pub fn kpi(dev: &DeveloperMetrics, max: &RepositoryMaxima) -> f64 {
    let normal = ratio(dev.normal_commits() as f64, max.commits as f64);
    let added = ratio(dev.lines_added as f64, max.lines_added as f64);
    let deleted = ratio(dev.lines_deleted as f64, max.lines_deleted as f64);
    let small = ratio(dev.small_commits as f64, max.small_commits as f64);
    let large = ratio(dev.large_commits as f64, max.large_commits as f64);
    let frequency = ratio(dev.commit_frequency(), max.commit_frequency);

    0.3 * normal
        + 0.25 * added
        + 0.25 * deleted
        + 0.1 * (1.0 - small)
        + 0.05 * large
        + 0.05 * frequency
}
