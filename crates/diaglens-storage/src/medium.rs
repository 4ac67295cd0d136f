//! Byte-level storage medium abstraction.

use thiserror::Error;

/// Default total-size quota, in the ballpark of a browser storage area.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Errors surfaced by a storage medium.
#[derive(Debug, Error)]
pub enum MediumError {
    /// The write would push the medium past its total byte quota.
    #[error("storage quota exceeded: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Any other backend failure. Callers treat these like quota failures
    /// since the medium cannot reliably distinguish causes.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A string-keyed byte store with a hard total-size quota.
///
/// Size accounting counts key length plus value length for every entry,
/// mirroring how web storage areas meter their quota.
pub trait StorageMedium: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, MediumError>;

    /// Store `value` under `key`, replacing any existing value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), MediumError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), MediumError>;

    /// All keys currently present, in unspecified order.
    fn keys(&self) -> Result<Vec<String>, MediumError>;

    /// Sum of key + value byte lengths over keys starting with `prefix`.
    fn used_bytes(&self, prefix: &str) -> Result<u64, MediumError> {
        let mut total = 0u64;
        for key in self.keys()? {
            if !key.starts_with(prefix) {
                continue;
            }
            if let Some(value) = self.get(&key)? {
                total += (key.len() + value.len()) as u64;
            }
        }
        Ok(total)
    }
}
