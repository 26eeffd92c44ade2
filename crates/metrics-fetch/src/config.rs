//! Pipeline tuning knobs

use std::time::Duration;

/// Settings of a collection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Maximum number of branch workers running at once per repository
    pub max_branches: usize,

    /// Stop walking a branch once more than this many commits were listed
    pub commit_cap: usize,

    /// Delay before each full-commit fetch within a worker
    pub pacing: Duration,

    /// Ceiling for each full-commit and diff request
    pub commit_timeout: Duration,
}

impl CollectorConfig {
    pub const DEFAULT_MAX_BRANCHES: usize = 5;
    pub const DEFAULT_COMMIT_CAP: usize = 100_000;
    pub const DEFAULT_PACING: Duration = Duration::from_millis(200);
    pub const DEFAULT_COMMIT_TIMEOUT: Duration = Duration::from_secs(80);
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_branches: Self::DEFAULT_MAX_BRANCHES,
            commit_cap: Self::DEFAULT_COMMIT_CAP,
            pacing: Self::DEFAULT_PACING,
            commit_timeout: Self::DEFAULT_COMMIT_TIMEOUT,
        }
    }
}
