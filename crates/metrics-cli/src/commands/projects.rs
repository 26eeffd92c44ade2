//! Projects command implementation

use anyhow::Result;
use colored::Colorize;
use metrics_db::MetricsDb;

use crate::helpers::{format_timestamp, or_dash};
use crate::output::{render_table, ProjectRow};

/// Lists stored projects
pub fn cmd_projects(db: &MetricsDb) -> Result<()> {
    let projects = db.list_projects()?;

    if projects.is_empty() {
        println!("{} No projects collected yet", "❌".red());
        return Ok(());
    }

    println!("\n{} {}", "📂 Projects:".bright_cyan(), projects.len().to_string().bold());

    let rows: Vec<ProjectRow> = projects
        .iter()
        .map(|p| ProjectRow {
            name: p.name.clone(),
            full_name: or_dash(&p.full_name),
            description: or_dash(&p.description),
            updated: format_timestamp(p.updated_at),
        })
        .collect();

    println!("{}", render_table(rows));
    Ok(())
}
