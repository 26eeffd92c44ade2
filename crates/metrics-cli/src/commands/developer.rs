//! Developer command implementation

use anyhow::Result;
use colored::Colorize;
use metrics_core::StoreError;
use metrics_db::MetricsDb;

use crate::helpers::{format_timestamp, or_dash};

/// Shows commit statistics and KPI of a developer within a repository
pub fn cmd_developer(project: &str, repo: &str, email: &str, db: &MetricsDb) -> Result<()> {
    let report = match db.developer_report(project, repo, email) {
        Ok(report) => report,
        Err(StoreError::NotFound(what)) => {
            eprintln!("{} {} not found in database", "❌".red(), what.bold());
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    let m = &report.metrics;

    println!(
        "\n{} {} <{}>",
        "👤 Developer:".bright_cyan(),
        report.name.bold(),
        or_dash(&report.email)
    );
    println!("  {}/{}", project, repo);
    println!("{}", "━".repeat(60).bright_black());
    println!("  {}        {}", "Commits:".bright_yellow(), m.total_commits.to_string().bold());
    println!(
        "  {}          {} / {}",
        "Lines:".bright_yellow(),
        format!("+{}", m.lines_added).green(),
        format!("-{}", m.lines_deleted).red()
    );
    println!(
        "  {}    small {}, normal {}, large {}",
        "Commit size:".bright_yellow(),
        m.small_commits,
        m.normal_commits(),
        m.large_commits
    );
    println!("  {}   {}", "First commit:".bright_yellow(), format_timestamp(m.first_commit_at));
    println!("  {}    {}", "Last commit:".bright_yellow(), format_timestamp(m.last_commit_at));
    println!("  {}      {:.2} commits/day", "Frequency:".bright_yellow(), report.commit_frequency);
    println!("{}", "━".repeat(60).bright_black());
    println!("  {}            {}", "KPI:".bright_green(), format!("{:.3}", report.kpi).bold());

    Ok(())
}
