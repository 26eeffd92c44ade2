//! Metrics DB - Relational persistence layer
//!
//! This crate manages the local SQLite store. Every write is a single
//! upsert statement against a unique key, so concurrent branch workers can
//! share one `MetricsDb` without explicit transactions:
//! - projects are keyed by name and overwritten on conflict
//! - repositories are keyed by (name, project) and overwritten on conflict
//! - developers are keyed by email, only the name is updated
//! - commits are keyed by hash, the first writer wins

mod analytics;
mod database;
mod schema;

pub use database::MetricsDb;
