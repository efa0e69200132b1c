use thiserror::Error;

/// Errors that can occur against the metadata and blob backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested record or object was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A backend read failed.
    #[error("storage read failed: {0}")]
    Read(String),

    /// A backend write or delete failed.
    #[error("storage write failed: {0}")]
    Write(String),

    /// Backend client construction failed (bad settings, unreachable
    /// endpoint, unresolvable credentials).
    #[error("storage configuration error: {0}")]
    Config(String),
}
