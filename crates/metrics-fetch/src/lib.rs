//! Metrics Fetch - Commit ingestion pipeline
//!
//! This crate is responsible for:
//! - Walking paginated commit listings per branch
//! - Resolving commit detail and diff content into line statistics
//! - Running branch workers under a bounded concurrency cap
//! - Persisting projects, repositories, developers and commits idempotently

mod collector;
mod config;
mod formatting;
mod outcome;
mod pool;
mod remote;
mod resolver;
mod stats;
mod walker;
mod worker;

pub use collector::{branches_or_head, repository_or_name_only, CollectError, Collector};
pub use config::CollectorConfig;
pub use outcome::{CommitOutcome, SkipReason, UnitSkip, WalkStop};
pub use pool::{BranchPool, PoolRun};
pub use remote::{RemoteClient, RemoteConfig};
pub use resolver::{decode_diff, resolve_commit};
pub use stats::{BranchReport, CollectStats, RepositoryReport};
pub use walker::{walk_commits, Walk};
pub use worker::{BranchContext, BranchWorker};
