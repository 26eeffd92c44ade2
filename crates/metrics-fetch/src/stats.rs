//! Statistics collected during a pass

use std::fmt;
use std::time::Duration;

use crate::formatting::{format_duration, format_number};
use crate::outcome::WalkStop;
use crate::walker::Walk;

/// Result of one branch worker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchReport {
    pub branch: String,
    pub pages: usize,
    /// Hashes returned by the listing, empty ones included
    pub discovered: usize,
    pub persisted: usize,
    /// Hashes that were already stored
    pub duplicates: usize,
    pub skipped: usize,
    pub stop: WalkStop,
}

impl BranchReport {
    pub(crate) fn new(branch: &str, walk: &Walk) -> Self {
        Self {
            branch: branch.to_string(),
            pages: walk.pages,
            discovered: walk.hashes.len(),
            stop: walk.stop.clone(),
            ..Default::default()
        }
    }
}

impl fmt::Display for BranchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} discovered, {} saved, {} already stored, {} skipped",
            format_number(self.discovered),
            format_number(self.persisted),
            format_number(self.duplicates),
            format_number(self.skipped)
        )?;
        if let WalkStop::PageFailed(reason) = &self.stop {
            write!(f, " (listing truncated: {})", reason)?;
        } else if self.stop == WalkStop::CapReached {
            write!(f, " (listing capped)")?;
        }
        Ok(())
    }
}

/// Result of processing one repository
#[derive(Debug, Clone, Default)]
pub struct RepositoryReport {
    pub project: String,
    pub repository: String,
    pub active_branches: usize,
    pub branches: Vec<BranchReport>,
    /// Branch workers that panicked
    pub failed_branches: usize,
}

/// Aggregated statistics of a collection pass
#[derive(Debug, Clone, Default)]
pub struct CollectStats {
    pub projects: usize,
    pub projects_failed: usize,
    pub repositories: usize,
    pub repositories_failed: usize,
    pub branches: usize,
    pub branches_failed: usize,
    pub pages: usize,
    pub commits_discovered: usize,
    pub commits_persisted: usize,
    pub commits_duplicate: usize,
    pub commits_skipped: usize,
    pub elapsed_time: Duration,
}

impl CollectStats {
    /// Adds the counters of a finished repository
    pub fn absorb(&mut self, report: &RepositoryReport) {
        self.repositories += 1;
        self.branches += report.branches.len() + report.failed_branches;
        self.branches_failed += report.failed_branches;

        for branch in &report.branches {
            self.pages += branch.pages;
            self.commits_discovered += branch.discovered;
            self.commits_persisted += branch.persisted;
            self.commits_duplicate += branch.duplicates;
            self.commits_skipped += branch.skipped;
        }
    }
}

impl fmt::Display for CollectStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Projects: {} ({} failed) | Repositories: {} ({} failed) | Branches: {} | Commits: {} discovered, {} saved, {} already stored, {} skipped | Time: {}",
            self.projects,
            self.projects_failed,
            self.repositories,
            self.repositories_failed,
            self.branches,
            format_number(self.commits_discovered),
            format_number(self.commits_persisted),
            format_number(self.commits_duplicate),
            format_number(self.commits_skipped),
            format_duration(self.elapsed_time)
        )
    }
}
