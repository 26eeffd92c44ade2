//! Read-only analytics queries over collected data

use chrono::{DateTime, Utc};
use metrics_core::{
    kpi, DeveloperActivity, DeveloperMetrics, DeveloperReport, RepositoryMaxima, RowId,
    StoreError, StoredProject, StoredRepository, LARGE_COMMIT_MIN_LINES, SMALL_COMMIT_MAX_LINES,
};
use rusqlite::{params, OptionalExtension, Row};

use crate::database::{db_err, to_count, MetricsDb};

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<StoredProject> {
    Ok(StoredProject {
        id: row.get(0)?,
        name: row.get(1)?,
        full_name: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn repository_from_row(row: &Row<'_>) -> rusqlite::Result<StoredRepository> {
    Ok(StoredRepository {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        active_branches: to_count(row.get(4)?),
    })
}

impl MetricsDb {
    /// Lists all projects ordered by name
    pub fn list_projects(&self) -> Result<Vec<StoredProject>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, name, full_name, description, created_at, updated_at
                 FROM projects ORDER BY name",
            )
            .map_err(db_err)?;
        let rows = stmt.query_map([], project_from_row).map_err(db_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
    }

    /// Finds a project by its unique name
    pub fn project_by_name(&self, name: &str) -> Result<StoredProject, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, name, full_name, description, created_at, updated_at
             FROM projects WHERE name = ?1",
            params![name],
            project_from_row,
        )
        .optional()
        .map_err(db_err)?
        .ok_or_else(|| StoreError::NotFound(format!("project {}", name)))
    }

    /// Lists repositories of a project ordered by name
    pub fn repositories(&self, project_id: RowId) -> Result<Vec<StoredRepository>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, project_id, name, description, active_branches
                 FROM repositories WHERE project_id = ?1 ORDER BY name",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map(params![project_id], repository_from_row)
            .map_err(db_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
    }

    /// Finds a repository by name within a project
    pub fn repository_by_name(
        &self,
        project_id: RowId,
        name: &str,
    ) -> Result<StoredRepository, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, project_id, name, description, active_branches
             FROM repositories WHERE project_id = ?1 AND name = ?2",
            params![project_id, name],
            repository_from_row,
        )
        .optional()
        .map_err(db_err)?
        .ok_or_else(|| StoreError::NotFound(format!("repository {}", name)))
    }

    /// Lists developers who committed to a repository, with their latest commit
    pub fn developers_by_repository(
        &self,
        repository_id: RowId,
    ) -> Result<Vec<DeveloperActivity>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT d.id, d.name, d.email, MAX(c.created_at)
                 FROM developers d
                 JOIN commits c ON c.developer_id = d.id
                 WHERE c.repository_id = ?1
                 GROUP BY d.id, d.name, d.email
                 ORDER BY d.email",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map(params![repository_id], |row| {
                Ok(DeveloperActivity {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    last_commit_at: row.get(3)?,
                })
            })
            .map_err(db_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
    }

    /// Aggregates commit metrics of one developer within one repository
    pub fn developer_metrics(
        &self,
        developer_id: RowId,
        repository_id: RowId,
    ) -> Result<DeveloperMetrics, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(lines_added), 0),
                    COALESCE(SUM(lines_deleted), 0),
                    COALESCE(SUM(CASE WHEN lines_added + lines_deleted <= ?3 THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN lines_added + lines_deleted >= ?4 THEN 1 ELSE 0 END), 0),
                    MIN(created_at),
                    MAX(created_at)
             FROM commits
             WHERE developer_id = ?1 AND repository_id = ?2",
            params![
                developer_id,
                repository_id,
                SMALL_COMMIT_MAX_LINES as i64,
                LARGE_COMMIT_MIN_LINES as i64
            ],
            |row| {
                Ok(DeveloperMetrics {
                    total_commits: to_count(row.get(0)?),
                    lines_added: to_count(row.get(1)?),
                    lines_deleted: to_count(row.get(2)?),
                    small_commits: to_count(row.get(3)?),
                    large_commits: to_count(row.get(4)?),
                    first_commit_at: row.get(5)?,
                    last_commit_at: row.get(6)?,
                })
            },
        )
        .map_err(db_err)
    }

    /// Computes the repository-wide maxima used to normalize KPI metrics
    pub fn repository_maxima(&self, repository_id: RowId) -> Result<RepositoryMaxima, StoreError> {
        let conn = self.conn()?;
        let (maxima, first, last) = conn
            .query_row(
                "SELECT COUNT(*),
                        COALESCE(MAX(lines_added), 0),
                        COALESCE(MAX(lines_deleted), 0),
                        COALESCE(SUM(CASE WHEN lines_added + lines_deleted <= ?2 THEN 1 ELSE 0 END), 0),
                        COALESCE(SUM(CASE WHEN lines_added + lines_deleted >= ?3 THEN 1 ELSE 0 END), 0),
                        MIN(created_at),
                        MAX(created_at)
                 FROM commits
                 WHERE repository_id = ?1",
                params![
                    repository_id,
                    SMALL_COMMIT_MAX_LINES as i64,
                    LARGE_COMMIT_MIN_LINES as i64
                ],
                |row| {
                    let maxima = RepositoryMaxima {
                        commits: to_count(row.get(0)?),
                        lines_added: to_count(row.get(1)?),
                        lines_deleted: to_count(row.get(2)?),
                        small_commits: to_count(row.get(3)?),
                        large_commits: to_count(row.get(4)?),
                        commit_frequency: 0.0,
                    };
                    let first: Option<DateTime<Utc>> = row.get(5)?;
                    let last: Option<DateTime<Utc>> = row.get(6)?;
                    Ok((maxima, first, last))
                },
            )
            .map_err(db_err)?;

        let span_days = match (first, last) {
            (Some(first), Some(last)) => (last - first).num_seconds() as f64 / 86_400.0,
            _ => 0.0,
        };

        Ok(RepositoryMaxima {
            commit_frequency: span_days,
            ..maxima
        })
    }

    /// Builds the statistics report of a developer within a repository
    pub fn developer_report(
        &self,
        project: &str,
        repository: &str,
        email: &str,
    ) -> Result<DeveloperReport, StoreError> {
        let project = self.project_by_name(project)?;
        let repository = self.repository_by_name(project.id, repository)?;
        let (developer_id, author) = self
            .get_developer(email)?
            .ok_or_else(|| StoreError::NotFound(format!("developer {}", email)))?;

        let metrics = self.developer_metrics(developer_id, repository.id)?;
        let maxima = self.repository_maxima(repository.id)?;

        Ok(DeveloperReport {
            id: developer_id,
            name: author.name,
            email: author.email,
            commit_frequency: metrics.commit_frequency(),
            kpi: kpi(&metrics, &maxima),
            metrics,
        })
    }
}
