//! Collection pass: sequential projects and repositories, parallel branches

use metrics_core::{
    Branch, MetricsStore, RepositoryDetail, RowId, SourceClient, SourceError,
};
use std::sync::Arc;
use std::time::Instant;

use crate::config::CollectorConfig;
use crate::outcome::UnitSkip;
use crate::pool::BranchPool;
use crate::stats::{CollectStats, RepositoryReport};
use crate::worker::{BranchContext, BranchWorker};

/// Errors that prevent a pass from starting
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("Failed to list projects: {0}")]
    ProjectListing(SourceError),
}

/// Fetches repository detail, falling back to a name-only record
pub async fn repository_or_name_only(
    source: &dyn SourceClient,
    project: &str,
    repository: &str,
) -> RepositoryDetail {
    match source.repository_detail(project, repository).await {
        Ok(detail) if !detail.name.is_empty() => detail,
        Ok(detail) => RepositoryDetail {
            name: repository.to_string(),
            ..detail
        },
        Err(e) => {
            log::warn!("⚠️  Skip repo details for {}/{}: {}", project, repository, e);
            RepositoryDetail::name_only(repository)
        }
    }
}

/// Fetches the branch list, falling back to a single `HEAD` branch
pub async fn branches_or_head(
    source: &dyn SourceClient,
    project: &str,
    repository: &str,
) -> Vec<Branch> {
    match source.list_branches(project, repository).await {
        Ok(branches) => branches,
        Err(e) => {
            log::warn!("⚠️  Skip branches for {}/{}: {}", project, repository, e);
            vec![Branch::head()]
        }
    }
}

/// Drives a full collection pass against one source and one store
pub struct Collector {
    source: Arc<dyn SourceClient>,
    store: Arc<dyn MetricsStore>,
    config: CollectorConfig,
    pool: BranchPool,
}

impl Collector {
    pub fn new(
        source: Arc<dyn SourceClient>,
        store: Arc<dyn MetricsStore>,
        config: CollectorConfig,
    ) -> Self {
        Self {
            source,
            store,
            pool: BranchPool::new(config.max_branches),
            config,
        }
    }

    /// Runs one pass over every project.
    ///
    /// Only a failed project listing is an error; every other failure skips
    /// the smallest enclosing unit and is counted in the returned stats.
    pub async fn collect(&self) -> Result<CollectStats, CollectError> {
        let start = Instant::now();

        let projects = self
            .source
            .list_projects()
            .await
            .map_err(CollectError::ProjectListing)?;
        log::info!("✅ Got {} projects", projects.len());

        let mut stats = CollectStats::default();

        for project in &projects {
            stats.projects += 1;
            if let Err(reason) = self.collect_project(&project.name, &mut stats).await {
                log::warn!("❌ Skip project {}: {}", project.name, reason);
                stats.projects_failed += 1;
            }
        }

        stats.elapsed_time = start.elapsed();
        log::info!("✅ Collection finished: {}", stats);
        Ok(stats)
    }

    async fn collect_project(&self, project: &str, stats: &mut CollectStats) -> Result<(), UnitSkip> {
        log::info!("📂 Processing project: {}", project);

        let detail = self
            .source
            .project_detail(project)
            .await
            .map_err(UnitSkip::Detail)?;
        let project_id = self.store.upsert_project(&detail).map_err(UnitSkip::Upsert)?;

        let repositories = self
            .source
            .list_repositories(project)
            .await
            .map_err(UnitSkip::Listing)?;

        for repository in &repositories {
            match self.collect_repository(project, project_id, &repository.name).await {
                Ok(report) => stats.absorb(&report),
                Err(reason) => {
                    log::warn!("❌ Skip repo {}/{}: {}", project, repository.name, reason);
                    stats.repositories += 1;
                    stats.repositories_failed += 1;
                }
            }
        }

        Ok(())
    }

    /// Upserts one repository and runs its branch workers to completion
    pub async fn collect_repository(
        &self,
        project: &str,
        project_id: RowId,
        repository: &str,
    ) -> Result<RepositoryReport, UnitSkip> {
        log::info!("📁 Processing repo: {}/{}", project, repository);

        let detail = repository_or_name_only(self.source.as_ref(), project, repository).await;
        let branches = branches_or_head(self.source.as_ref(), project, repository).await;
        let active_branches = branches.len();

        let repository_id = self
            .store
            .upsert_repository(project_id, &detail, active_branches)
            .map_err(UnitSkip::Upsert)?;

        let contexts: Vec<BranchContext> = branches
            .into_iter()
            .map(|branch| BranchContext {
                project: project.to_string(),
                repository: repository.to_string(),
                branch: branch.name,
                project_id,
                repository_id,
            })
            .collect();

        let worker = BranchWorker::new(
            Arc::clone(&self.source),
            Arc::clone(&self.store),
            self.config,
        );
        let run = self
            .pool
            .run(contexts, move |ctx| {
                let worker = worker.clone();
                async move { worker.run(&ctx).await }
            })
            .await;

        Ok(RepositoryReport {
            project: project.to_string(),
            repository: repository.to_string(),
            active_branches,
            branches: run.results,
            failed_branches: run.failed,
        })
    }
}
