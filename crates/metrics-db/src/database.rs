//! Database operations and management

use anyhow::{Context, Result};
use chrono::Utc;
use metrics_core::{
    Author, MetricsStore, NewCommit, ProjectDetail, RepositoryDetail, RowId, StoreError,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::schema::SCHEMA;

/// Main structure managing the database
pub struct MetricsDb {
    /// Single connection; each call holds the lock for one statement.
    ///
    /// Callers on the async runtime take this blocking lock directly. It must
    /// never be held across an `.await`, and statements stay single-row so a
    /// contended worker thread is parked for one statement at most.
    conn: Mutex<Connection>,
}

pub(crate) fn db_err(e: rusqlite::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

/// Counters are stored as INTEGER; negative values never occur
pub(crate) fn to_count(v: i64) -> u64 {
    u64::try_from(v).unwrap_or(0)
}

impl MetricsDb {
    /// Opens or creates a database file at the specified location
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("Failed to open database at {:?}", path.as_ref()))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .context("Failed to enable WAL journal")?;

        Self::init(conn)
    }

    /// Opens a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")
            .context("Failed to enable foreign keys")?;
        conn.execute_batch(SCHEMA)
            .context("Failed to create schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Database("connection lock poisoned".to_string()))
    }

    fn count(&self, table: &str) -> Result<u64, StoreError> {
        let conn = self.conn()?;
        let n: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .map_err(db_err)?;
        Ok(to_count(n))
    }

    pub fn project_count(&self) -> Result<u64, StoreError> {
        self.count("projects")
    }

    pub fn repository_count(&self) -> Result<u64, StoreError> {
        self.count("repositories")
    }

    pub fn developer_count(&self) -> Result<u64, StoreError> {
        self.count("developers")
    }

    pub fn commit_count(&self) -> Result<u64, StoreError> {
        self.count("commits")
    }

    /// Retrieves a commit row by hash
    pub fn get_commit(&self, hash: &str) -> Result<Option<NewCommit>, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT hash, message, created_at, branch_name, lines_added, lines_deleted,
                    developer_id, project_id, repository_id
             FROM commits WHERE hash = ?1",
            params![hash],
            |row| {
                Ok(NewCommit {
                    hash: row.get(0)?,
                    message: row.get(1)?,
                    created_at: row.get(2)?,
                    branch_name: row.get(3)?,
                    lines_added: to_count(row.get(4)?),
                    lines_deleted: to_count(row.get(5)?),
                    developer_id: row.get(6)?,
                    project_id: row.get(7)?,
                    repository_id: row.get(8)?,
                })
            },
        )
        .optional()
        .map_err(db_err)
    }

    /// Retrieves a developer by email
    pub fn get_developer(&self, email: &str) -> Result<Option<(RowId, Author)>, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, name, email FROM developers WHERE email = ?1",
            params![email],
            |row| Ok((row.get(0)?, Author::new(row.get::<_, String>(1)?, row.get::<_, String>(2)?))),
        )
        .optional()
        .map_err(db_err)
    }
}

impl MetricsStore for MetricsDb {
    fn upsert_project(&self, project: &ProjectDetail) -> Result<RowId, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            "INSERT INTO projects (name, full_name, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (name) DO UPDATE SET
                 full_name = excluded.full_name,
                 description = excluded.description,
                 updated_at = excluded.updated_at
             RETURNING id",
            params![
                project.name,
                project.full_name,
                project.description,
                project.created_at,
                project.updated_at
            ],
            |row| row.get(0),
        )
        .map_err(db_err)
    }

    fn upsert_repository(
        &self,
        project_id: RowId,
        repo: &RepositoryDetail,
        active_branches: usize,
    ) -> Result<RowId, StoreError> {
        let now = Utc::now();
        let conn = self.conn()?;
        conn.query_row(
            "INSERT INTO repositories (name, description, active_branches, project_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             ON CONFLICT (name, project_id) DO UPDATE SET
                 description = excluded.description,
                 active_branches = excluded.active_branches,
                 updated_at = excluded.updated_at
             RETURNING id",
            params![
                repo.name,
                repo.description,
                active_branches as i64,
                project_id,
                now
            ],
            |row| row.get(0),
        )
        .map_err(db_err)
    }

    fn upsert_developer(&self, author: &Author) -> Result<RowId, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            "INSERT INTO developers (name, email)
             VALUES (?1, ?2)
             ON CONFLICT (email) DO UPDATE SET name = excluded.name
             RETURNING id",
            params![author.name, author.email],
            |row| row.get(0),
        )
        .map_err(db_err)
    }

    fn insert_commit(&self, commit: &NewCommit) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        let inserted = conn
            .execute(
                "INSERT INTO commits (hash, message, created_at, branch_name, lines_added,
                                      lines_deleted, developer_id, project_id, repository_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT (hash) DO NOTHING",
                params![
                    commit.hash,
                    commit.message,
                    commit.created_at,
                    commit.branch_name,
                    commit.lines_added as i64,
                    commit.lines_deleted as i64,
                    commit.developer_id,
                    commit.project_id,
                    commit.repository_id
                ],
            )
            .map_err(db_err)?;

        if inserted == 0 {
            log::debug!("Commit {} already stored, keeping existing row", commit.hash);
        }
        Ok(inserted > 0)
    }
}
