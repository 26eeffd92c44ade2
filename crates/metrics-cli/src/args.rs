//! Argument groups shared by the collecting commands

use anyhow::{Context, Result};
use clap::Args;
use metrics_db::MetricsDb;
use metrics_fetch::{Collector, CollectorConfig, RemoteClient, RemoteConfig};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Connection to the code-hosting API
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// API root URL (e.g. https://host/app/sourcecode/api/api/v2)
    #[arg(long, env = "CODEMETRICS_BASE_URL")]
    pub base_url: Url,

    /// Basic auth username
    #[arg(long, env = "CODEMETRICS_USERNAME", default_value = "")]
    pub username: String,

    /// Basic auth password
    #[arg(long, env = "CODEMETRICS_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Accept invalid TLS certificates
    #[arg(long)]
    pub insecure: bool,

    /// Timeout of every API request, in seconds (default: none)
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
}

/// Limits of a collection pass
#[derive(Args, Debug)]
pub struct PipelineArgs {
    /// Maximum number of branches processed concurrently
    #[arg(long, default_value_t = CollectorConfig::DEFAULT_MAX_BRANCHES)]
    pub max_branches: usize,

    /// Stop listing a branch once it has more commits than this
    #[arg(long, default_value_t = CollectorConfig::DEFAULT_COMMIT_CAP)]
    pub commit_cap: usize,

    /// Delay before each commit request, in milliseconds
    #[arg(long, default_value = "200")]
    pub pacing_ms: u64,

    /// Timeout of each commit detail or diff request, in seconds
    #[arg(long, default_value = "80")]
    pub commit_timeout_secs: u64,
}

impl SourceArgs {
    pub fn remote_config(self) -> RemoteConfig {
        RemoteConfig {
            base_url: self.base_url,
            username: self.username,
            password: self.password,
            insecure: self.insecure,
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

impl PipelineArgs {
    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            max_branches: self.max_branches,
            commit_cap: self.commit_cap,
            pacing: Duration::from_millis(self.pacing_ms),
            commit_timeout: Duration::from_secs(self.commit_timeout_secs),
        }
    }
}

/// Wires the HTTP client and the database into a collector
pub fn build_collector(source: SourceArgs, pipeline: PipelineArgs, db: MetricsDb) -> Result<Collector> {
    let base_url = source.base_url.clone();
    let client = RemoteClient::new(source.remote_config())
        .with_context(|| format!("Failed to create API client for {}", base_url))?;

    log::info!("🔗 Source: {}", base_url);
    log::info!(
        "⚙️  Max branches: {}, commit cap: {}, pacing: {}ms",
        pipeline.max_branches,
        pipeline.commit_cap,
        pipeline.pacing_ms
    );

    Ok(Collector::new(
        Arc::new(client),
        Arc::new(db),
        pipeline.collector_config(),
    ))
}
