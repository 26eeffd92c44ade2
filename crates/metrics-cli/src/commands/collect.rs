//! Collect command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use metrics_db::MetricsDb;
use metrics_fetch::CollectStats;

use crate::args::{build_collector, PipelineArgs, SourceArgs};

/// Runs a single collection pass
pub async fn cmd_collect(source: SourceArgs, pipeline: PipelineArgs, db: MetricsDb) -> Result<()> {
    let collector = build_collector(source, pipeline, db)?;

    let stats = collector
        .collect()
        .await
        .context("Collection pass failed")?;

    print_summary(&stats);
    Ok(())
}

/// Prints the counters of a finished pass
pub(crate) fn print_summary(stats: &CollectStats) {
    println!("\n{}", "Collection Summary:".bright_cyan().bold());
    println!(
        "  {}: {} ({} failed)",
        "Projects".bright_yellow(),
        stats.projects.to_string().bold(),
        stats.projects_failed
    );
    println!(
        "  {}: {} ({} failed)",
        "Repositories".bright_yellow(),
        stats.repositories.to_string().bold(),
        stats.repositories_failed
    );
    println!(
        "  {}: {} ({} failed)",
        "Branches".bright_yellow(),
        stats.branches.to_string().bold(),
        stats.branches_failed
    );
    println!(
        "  {}: {} discovered, {} saved, {} already stored, {} skipped",
        "Commits".bright_yellow(),
        stats.commits_discovered.to_string().bold(),
        stats.commits_persisted.to_string().green(),
        stats.commits_duplicate,
        if stats.commits_skipped > 0 {
            stats.commits_skipped.to_string().red()
        } else {
            stats.commits_skipped.to_string().normal()
        }
    );
    println!(
        "  {}: {:.1}s",
        "Time".bright_yellow(),
        stats.elapsed_time.as_secs_f64()
    );
}
