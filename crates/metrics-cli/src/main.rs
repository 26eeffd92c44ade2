//! Codemetrics CLI - Commit metrics collector for a code-hosting service
//!
//! Provides:
//! - One-shot and periodic collection of projects, repositories and commits
//! - Listing of stored projects, repositories and developers
//! - Per-developer statistics with a weighted KPI

mod args;
mod commands;
mod helpers;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use metrics_db::MetricsDb;
use std::path::PathBuf;

use args::{PipelineArgs, SourceArgs};
use commands::{
    cmd_collect, cmd_developer, cmd_developers, cmd_projects, cmd_repos, cmd_stats, cmd_watch,
};

#[derive(Parser)]
#[command(name = "codemetrics")]
#[command(about = "Collects commit metrics from a code-hosting service into SQLite", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the database
    #[arg(short, long, default_value = "./codemetrics.db")]
    database: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs one collection pass over every project
    Collect {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Runs a collection pass now and then periodically until interrupted
    Watch {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Seconds between the start of two passes
        #[arg(long, default_value = "600")]
        interval_secs: u64,
    },

    /// Show database statistics
    Stats,

    /// Lists stored projects
    Projects,

    /// Lists stored repositories of a project
    Repos {
        /// Project name
        project: String,
    },

    /// Lists developers who committed to a repository
    Developers {
        /// Project name
        project: String,

        /// Repository name
        repo: String,
    },

    /// Shows commit statistics and KPI of one developer in a repository
    Developer {
        /// Project name
        project: String,

        /// Repository name
        repo: String,

        /// Developer email
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logger
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&cli.log_level)
    ).init();

    // Open database
    let db = MetricsDb::open(&cli.database)
        .with_context(|| format!("Failed to open database at {:?}", cli.database))?;

    match cli.command {
        Commands::Collect { source, pipeline } => {
            cmd_collect(source, pipeline, db).await?;
        }
        Commands::Watch { source, pipeline, interval_secs } => {
            cmd_watch(source, pipeline, interval_secs, db).await?;
        }
        Commands::Stats => {
            cmd_stats(&db)?;
        }
        Commands::Projects => {
            cmd_projects(&db)?;
        }
        Commands::Repos { project } => {
            cmd_repos(&project, &db)?;
        }
        Commands::Developers { project, repo } => {
            cmd_developers(&project, &repo, &db)?;
        }
        Commands::Developer { project, repo, email } => {
            cmd_developer(&project, &repo, &email, &db)?;
        }
    }

    Ok(())
}
