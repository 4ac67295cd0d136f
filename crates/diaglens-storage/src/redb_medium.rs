//! redb-backed storage medium.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use crate::medium::{DEFAULT_QUOTA_BYTES, MediumError, StorageMedium};

const SLOTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("slots");

/// Durable medium storing slots in a single redb table.
///
/// redb itself has no size quota, so the quota is enforced here by summing
/// key + value lengths before each write, the same accounting the in-memory
/// medium uses. A rejected write aborts the transaction and leaves the
/// previous contents intact.
#[derive(Debug, Clone)]
pub struct RedbMedium {
    db: Arc<Database>,
    quota: usize,
}

impl RedbMedium {
    /// Create (or open) the database file at `path`.
    pub fn new(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let db = Arc::new(Database::create(path)?);
        Self::with_db(db)
    }

    /// Wrap an already-open database.
    pub fn with_db(db: Arc<Database>) -> anyhow::Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(SLOTS_TABLE)?;
        write_txn.commit()?;

        Ok(Self {
            db,
            quota: DEFAULT_QUOTA_BYTES,
        })
    }

    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = quota;
        self
    }
}

fn backend<E: std::fmt::Display>(err: E) -> MediumError {
    MediumError::Backend(err.to_string())
}

impl StorageMedium for RedbMedium {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, MediumError> {
        let read_txn = self.db.begin_read().map_err(backend)?;
        let table = read_txn.open_table(SLOTS_TABLE).map_err(backend)?;
        Ok(table.get(key).map_err(backend)?.map(|v| v.value().to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), MediumError> {
        let write_txn = self.db.begin_write().map_err(backend)?;
        {
            let mut table = write_txn.open_table(SLOTS_TABLE).map_err(backend)?;

            let mut other_entries = 0usize;
            for entry in table.iter().map_err(backend)? {
                let (k, v) = entry.map_err(backend)?;
                if k.value() != key {
                    other_entries += k.value().len() + v.value().len();
                }
            }
            let needed = other_entries + key.len() + value.len();
            if needed > self.quota {
                // Dropping the uncommitted transaction aborts it.
                return Err(MediumError::QuotaExceeded {
                    needed,
                    quota: self.quota,
                });
            }

            table.insert(key, value).map_err(backend)?;
        }
        write_txn.commit().map_err(backend)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), MediumError> {
        let write_txn = self.db.begin_write().map_err(backend)?;
        {
            let mut table = write_txn.open_table(SLOTS_TABLE).map_err(backend)?;
            table.remove(key).map_err(backend)?;
        }
        write_txn.commit().map_err(backend)?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, MediumError> {
        let read_txn = self.db.begin_read().map_err(backend)?;
        let table = read_txn.open_table(SLOTS_TABLE).map_err(backend)?;

        let mut keys = Vec::new();
        for entry in table.iter().map_err(backend)? {
            let (key, _) = entry.map_err(backend)?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }
}
