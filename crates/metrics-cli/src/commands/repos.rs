//! Repos command implementation

use anyhow::Result;
use colored::Colorize;
use metrics_core::StoreError;
use metrics_db::MetricsDb;

use crate::helpers::or_dash;
use crate::output::{render_table, RepositoryRow};

/// Lists stored repositories of a project
pub fn cmd_repos(project: &str, db: &MetricsDb) -> Result<()> {
    let stored = match db.project_by_name(project) {
        Ok(stored) => stored,
        Err(StoreError::NotFound(_)) => {
            eprintln!("{} Project {} not found in database", "❌".red(), project.bold());
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let repositories = db.repositories(stored.id)?;
    if repositories.is_empty() {
        println!("{} No repositories collected for '{}'", "❌".red(), project.bold());
        return Ok(());
    }

    println!(
        "\n{} {} ({} repositories)",
        "📁".bright_cyan(),
        project.bold().bright_white(),
        repositories.len()
    );

    let rows: Vec<RepositoryRow> = repositories
        .iter()
        .map(|r| RepositoryRow {
            name: r.name.clone(),
            description: or_dash(&r.description),
            active_branches: r.active_branches,
        })
        .collect();

    println!("{}", render_table(rows));
    Ok(())
}
