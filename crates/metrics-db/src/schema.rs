//! Table definitions

pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    full_name   TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    created_at  TEXT,
    updated_at  TEXT
);

CREATE TABLE IF NOT EXISTS repositories (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL,
    description     TEXT NOT NULL DEFAULT '',
    active_branches INTEGER NOT NULL DEFAULT 0,
    project_id      INTEGER NOT NULL REFERENCES projects(id),
    created_at      TEXT,
    updated_at      TEXT,
    UNIQUE (name, project_id)
);

CREATE TABLE IF NOT EXISTS developers (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS commits (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    hash          TEXT NOT NULL UNIQUE,
    message       TEXT NOT NULL DEFAULT '',
    created_at    TEXT,
    branch_name   TEXT NOT NULL,
    lines_added   INTEGER NOT NULL DEFAULT 0,
    lines_deleted INTEGER NOT NULL DEFAULT 0,
    developer_id  INTEGER NOT NULL REFERENCES developers(id),
    project_id    INTEGER NOT NULL REFERENCES projects(id),
    repository_id INTEGER NOT NULL REFERENCES repositories(id)
);

CREATE INDEX IF NOT EXISTS idx_commits_repo_dev ON commits (repository_id, developer_id);
"#;
