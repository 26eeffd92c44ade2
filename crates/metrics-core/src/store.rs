//! Persistence seam

use crate::error::StoreError;
use crate::models::{Author, NewCommit, ProjectDetail, RepositoryDetail, RowId};

/// Idempotent write operations used by the collector.
///
/// Each method is a single atomic upsert. Implementations must be safe to
/// call from concurrently running branch workers.
pub trait MetricsStore: Send + Sync {
    /// Inserts a project keyed by name. On conflict the full name,
    /// description and update time are overwritten; the creation time is kept.
    fn upsert_project(&self, project: &ProjectDetail) -> Result<RowId, StoreError>;

    /// Inserts a repository keyed by (name, project), overwriting description
    /// and active branch count on conflict
    fn upsert_repository(
        &self,
        project_id: RowId,
        repo: &RepositoryDetail,
        active_branches: usize,
    ) -> Result<RowId, StoreError>;

    /// Inserts a developer keyed by email, updating only the name on conflict
    fn upsert_developer(&self, author: &Author) -> Result<RowId, StoreError>;

    /// Inserts a commit keyed by hash. Returns `false` when the hash was
    /// already stored, in which case the existing row is left untouched.
    fn insert_commit(&self, commit: &NewCommit) -> Result<bool, StoreError>;
}
