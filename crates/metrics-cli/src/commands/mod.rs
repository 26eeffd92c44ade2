//! Command implementations

mod collect;
mod developer;
mod developers;
mod projects;
mod repos;
mod stats;
mod watch;

pub use collect::cmd_collect;
pub use developer::cmd_developer;
pub use developers::cmd_developers;
pub use projects::cmd_projects;
pub use repos::cmd_repos;
pub use stats::cmd_stats;
pub use watch::cmd_watch;
