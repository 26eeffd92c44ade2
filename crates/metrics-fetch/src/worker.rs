//! Branch worker: walk one branch, then resolve and persist its commits

use metrics_core::{MetricsStore, RowId, SourceClient};
use std::fmt;
use std::sync::Arc;
use tokio::time;

use crate::config::CollectorConfig;
use crate::outcome::{CommitOutcome, SkipReason};
use crate::resolver::resolve_commit;
use crate::stats::BranchReport;
use crate::walker::walk_commits;

/// Identifies the branch a worker runs on and the rows its commits link to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub project: String,
    pub repository: String,
    pub branch: String,
    pub project_id: RowId,
    pub repository_id: RowId,
}

impl fmt::Display for BranchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.project, self.repository, self.branch)
    }
}

/// Processes the commits of one branch strictly in listing order
#[derive(Clone)]
pub struct BranchWorker {
    source: Arc<dyn SourceClient>,
    store: Arc<dyn MetricsStore>,
    config: CollectorConfig,
}

impl BranchWorker {
    pub fn new(
        source: Arc<dyn SourceClient>,
        store: Arc<dyn MetricsStore>,
        config: CollectorConfig,
    ) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    /// Walks the branch, then handles every listed commit sequentially.
    ///
    /// Failures are confined to the commit they occur on.
    pub async fn run(&self, ctx: &BranchContext) -> BranchReport {
        let walk = walk_commits(self.source.as_ref(), ctx, self.config.commit_cap).await;
        log::info!(
            "🌿 {}: {} commits in {} pages",
            ctx,
            walk.hashes.len(),
            walk.pages
        );

        let mut report = BranchReport::new(&ctx.branch, &walk);

        for hash in walk.hashes.iter().filter(|h| !h.is_empty()) {
            match self.process_commit(ctx, hash).await {
                CommitOutcome::Persisted => report.persisted += 1,
                CommitOutcome::AlreadyStored => report.duplicates += 1,
                CommitOutcome::Skipped(reason) => {
                    log::warn!("❌ Skip commit {} on {}: {}", hash, ctx, reason);
                    report.skipped += 1;
                }
            }
        }

        log::info!("✅ {}: {}", ctx, report);
        report
    }

    /// Paces, resolves, and persists a single commit
    pub async fn process_commit(&self, ctx: &BranchContext, hash: &str) -> CommitOutcome {
        if !self.config.pacing.is_zero() {
            time::sleep(self.config.pacing).await;
        }

        let resolved = match resolve_commit(
            self.source.as_ref(),
            &ctx.project,
            &ctx.repository,
            hash,
            self.config.commit_timeout,
        )
        .await
        {
            Ok(resolved) => resolved,
            Err(reason) => return CommitOutcome::Skipped(reason),
        };

        let developer_id = match self.store.upsert_developer(&resolved.author) {
            Ok(id) => id,
            Err(e) => return CommitOutcome::Skipped(SkipReason::Developer(e)),
        };

        let row = resolved.into_row(&ctx.branch, developer_id, ctx.project_id, ctx.repository_id);
        match self.store.insert_commit(&row) {
            Ok(true) => {
                log::debug!("💾 Saved commit {}", row);
                CommitOutcome::Persisted
            }
            Ok(false) => CommitOutcome::AlreadyStored,
            Err(e) => CommitOutcome::Skipped(SkipReason::Commit(e)),
        }
    }
}
