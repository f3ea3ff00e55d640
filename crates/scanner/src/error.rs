//! Scan error types.

/// Errors produced by a scan pass.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// No candidate prefix yielded a usable logs directory.
    #[error("no installation roots found")]
    NoRoots,

    /// Failed to persist the scan result.
    #[error("failed to write scan output: {0}")]
    Write(#[source] std::io::Error),

    /// Failed to serialize or read persisted scan state.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read persisted scan state.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
