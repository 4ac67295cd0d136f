//! Error types for the diaglens store.

use thiserror::Error;

/// Store error types surfaced across the facade.
///
/// Decode failures and corrupt collections are deliberately absent: the
/// codec falls back to the original payload and a corrupt collection reads
/// as empty. Neither crosses the facade.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Every eviction step failed, including the single-record force write
    /// after a namespace reset. The caller's in-memory record is intact but
    /// was not persisted.
    #[error("storage is full: could not persist even a single record")]
    StorageExhausted,

    /// Medium failure outside the save recovery path (delete/clear writes).
    #[error(transparent)]
    Medium(#[from] diaglens_storage::MediumError),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
