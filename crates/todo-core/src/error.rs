use thiserror::Error;

/// Result type for operations on core domain types.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Reasons a path identifier is rejected before reaching the store.
///
/// The display strings are part of the HTTP contract and are returned to
/// callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("id is required")]
    Missing,
    #[error("id is invalid")]
    InvalidLength(usize),
    #[error("Invalid id {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(transparent)]
    InvalidId(#[from] IdError),
    #[error("invalid todo fields: {0}")]
    InvalidFields(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}
