//! Per-unit results of the pipeline

use metrics_core::{SourceError, StoreError};

/// Why a single commit was not persisted
#[derive(Debug, Clone, thiserror::Error)]
pub enum SkipReason {
    #[error("full commit fetch failed: {0}")]
    FullCommit(SourceError),

    #[error("diff fetch failed: {0}")]
    Diff(SourceError),

    #[error("diff is not valid base64: {0}")]
    DiffDecode(String),

    #[error("{stage} fetch timed out after {secs}s")]
    Timeout { stage: &'static str, secs: u64 },

    #[error("developer upsert failed: {0}")]
    Developer(StoreError),

    #[error("commit upsert failed: {0}")]
    Commit(StoreError),
}

/// Result of processing one commit
#[derive(Debug, Clone)]
pub enum CommitOutcome {
    Persisted,
    /// The hash was already stored; the existing row was kept
    AlreadyStored,
    Skipped(SkipReason),
}

/// Why a project or repository was skipped as a whole
#[derive(Debug, Clone, thiserror::Error)]
pub enum UnitSkip {
    #[error("detail fetch failed: {0}")]
    Detail(SourceError),

    #[error("repository listing failed: {0}")]
    Listing(SourceError),

    #[error("upsert failed: {0}")]
    Upsert(StoreError),
}

/// How a commit walk ended
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WalkStop {
    /// The last page had no next cursor
    #[default]
    Exhausted,

    /// A page request failed; earlier pages were kept
    PageFailed(String),

    /// More commits than the safety cap were listed
    CapReached,
}

impl WalkStop {
    pub fn is_truncated(&self) -> bool {
        !matches!(self, WalkStop::Exhausted)
    }
}
