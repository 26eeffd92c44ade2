//! Error types for metrics-core

/// Errors returned by a remote source client.
///
/// Transport and decode failures are handled the same way by the pipeline:
/// the affected unit of work is skipped and the pass continues.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Payload decoding error: {0}")]
    Decode(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors returned by a metrics store
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),
}
