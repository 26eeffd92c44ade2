//! Developers command implementation

use anyhow::Result;
use colored::Colorize;
use metrics_core::StoreError;
use metrics_db::MetricsDb;

use crate::helpers::{format_last_seen, or_dash};
use crate::output::{render_table, DeveloperRow};

/// Lists developers of a repository with their latest commit
pub fn cmd_developers(project: &str, repo: &str, db: &MetricsDb) -> Result<()> {
    let repository = match db
        .project_by_name(project)
        .and_then(|p| db.repository_by_name(p.id, repo))
    {
        Ok(repository) => repository,
        Err(StoreError::NotFound(what)) => {
            eprintln!("{} {} not found in database", "❌".red(), what.bold());
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let developers = db.developers_by_repository(repository.id)?;
    if developers.is_empty() {
        println!("{} No commits collected for {}/{}", "❌".red(), project, repo);
        return Ok(());
    }

    println!(
        "\n{} {}/{} ({} developers)",
        "👥".bright_cyan(),
        project.bold().bright_white(),
        repo.bold().bright_white(),
        developers.len()
    );

    let rows: Vec<DeveloperRow> = developers
        .iter()
        .map(|d| DeveloperRow {
            name: d.name.clone(),
            email: or_dash(&d.email),
            last_commit: format_last_seen(d.last_commit_at),
        })
        .collect();

    println!("{}", render_table(rows));
    Ok(())
}
