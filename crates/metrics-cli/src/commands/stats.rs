//! Stats command implementation

use anyhow::Result;
use colored::Colorize;
use metrics_db::MetricsDb;

/// Displays database statistics
pub fn cmd_stats(db: &MetricsDb) -> Result<()> {
    println!("{}", "Database Statistics:".bright_cyan().bold());
    println!("  {}: {}", "Projects".bright_yellow(), db.project_count()?.to_string().bold());
    println!("  {}: {}", "Repositories".bright_yellow(), db.repository_count()?.to_string().bold());
    println!("  {}: {}", "Developers".bright_yellow(), db.developer_count()?.to_string().bold());
    println!("  {}: {}", "Commits".bright_yellow(), db.commit_count()?.to_string().bold());
    Ok(())
}
