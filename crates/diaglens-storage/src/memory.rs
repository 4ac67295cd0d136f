//! In-memory storage medium with a configurable quota.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::medium::{DEFAULT_QUOTA_BYTES, MediumError, StorageMedium};

/// HashMap-backed medium for tests and ephemeral sessions.
#[derive(Debug)]
pub struct MemoryMedium {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    quota: usize,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota,
        }
    }
}

impl Default for MemoryMedium {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, MediumError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), MediumError> {
        let mut entries = self.entries.lock();
        let other_entries: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        let needed = other_entries + key.len() + value.len();
        if needed > self.quota {
            return Err(MediumError::QuotaExceeded {
                needed,
                quota: self.quota,
            });
        }
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), MediumError> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, MediumError> {
        Ok(self.entries.lock().keys().cloned().collect())
    }
}
