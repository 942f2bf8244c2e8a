use thiserror::Error;

/// Errors surfaced by store operations.
///
/// Worker startup and migrations report through `anyhow` instead: a database
/// that cannot be opened is fatal for the whole data layer, so those paths
/// carry full context chains rather than a typed variant.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("invalid {field} in stored row: {reason}")]
    Corrupt { field: &'static str, reason: String },

    #[error("failed to encode schedule: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("database worker is no longer running")]
    Closed,
}
