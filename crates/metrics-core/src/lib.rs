//! Metrics Core - Shared data models and pure logic
//!
//! This crate defines the data structures shared across the workspace:
//! remote payload types, persisted row types, the `SourceClient` and
//! `MetricsStore` seams, diff statistics and developer KPI scoring.

mod analytics;
mod diff;
mod error;
mod models;
mod source;
mod store;

pub use analytics::{
    commit_frequency, kpi, DeveloperActivity, DeveloperMetrics, DeveloperReport,
    RepositoryMaxima, StoredProject, StoredRepository, LARGE_COMMIT_MIN_LINES,
    SMALL_COMMIT_MAX_LINES,
};
pub use diff::{diff_stats, DiffStats};
pub use error::{SourceError, StoreError};
pub use models::{
    Author, Branch, CommitListItem, CommitPage, FullCommit, NewCommit, ProjectDetail,
    ProjectSummary, RepositoryDetail, RepositorySummary, ResolvedCommit, RowId,
    null_as_default,
};
pub use source::SourceClient;
pub use store::MetricsStore;
