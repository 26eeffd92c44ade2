//! Commit detail resolution

use data_encoding::BASE64;
use metrics_core::{diff_stats, ResolvedCommit, SourceClient};
use std::time::Duration;
use tokio::time;

use crate::outcome::SkipReason;

/// Decodes a base64 diff payload into text.
///
/// Line breaks inside the payload are ignored. Invalid UTF-8 is replaced
/// rather than rejected.
pub fn decode_diff(encoded: &str) -> Result<String, SkipReason> {
    let compact: String = encoded
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n'))
        .collect();

    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| SkipReason::DiffDecode(e.to_string()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Fetches full commit metadata and diff for `hash` and reduces them to a
/// persistable commit.
///
/// Both requests share the same `timeout` ceiling. Any failure yields a
/// `SkipReason` and nothing is persisted for this hash.
pub async fn resolve_commit(
    source: &dyn SourceClient,
    project: &str,
    repository: &str,
    hash: &str,
    timeout: Duration,
) -> Result<ResolvedCommit, SkipReason> {
    let full = time::timeout(timeout, source.full_commit(project, repository, hash))
        .await
        .map_err(|_| SkipReason::Timeout {
            stage: "full commit",
            secs: timeout.as_secs(),
        })?
        .map_err(SkipReason::FullCommit)?;

    let encoded = time::timeout(timeout, source.commit_diff(project, repository, hash))
        .await
        .map_err(|_| SkipReason::Timeout {
            stage: "diff",
            secs: timeout.as_secs(),
        })?
        .map_err(SkipReason::Diff)?;

    let diff = decode_diff(&encoded)?;

    Ok(ResolvedCommit {
        hash: hash.to_string(),
        author: full.author.normalized(),
        message: full.message,
        created_at: full.created_at,
        stats: diff_stats(&diff),
    })
}
