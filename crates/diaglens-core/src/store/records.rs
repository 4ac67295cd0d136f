//! Record slot - the full collection serialized under one storage key.

use std::sync::Arc;

use diaglens_models::DiagramRecord;
use diaglens_storage::{MediumError, StorageMedium};

/// Fixed prefix namespacing every key this application owns.
pub(crate) const KEY_PREFIX: &str = "diaglens:";
/// Storage key holding the serialized record collection.
pub(crate) const RECORDS_KEY: &str = "diaglens:records";

/// Durable read/write of the entire record collection as one unit.
#[derive(Clone)]
pub(crate) struct RecordSlot {
    medium: Arc<dyn StorageMedium>,
}

impl RecordSlot {
    pub(crate) fn new(medium: Arc<dyn StorageMedium>) -> Self {
        Self { medium }
    }

    /// Deserialize the persisted collection.
    ///
    /// A missing key is an empty collection. A corrupt blob or a failing
    /// read is logged and also treated as empty: corruption means "no
    /// data", never a fatal error.
    pub(crate) fn read_all(&self) -> Vec<DiagramRecord> {
        let bytes = match self.medium.get(RECORDS_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!("failed to read record collection: {err}");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("corrupt record collection, treating as empty: {err}");
                Vec::new()
            }
        }
    }

    /// Serialize and write the full collection under the storage key.
    pub(crate) fn write_all(&self, records: &[DiagramRecord]) -> Result<(), MediumError> {
        let bytes =
            serde_json::to_vec(records).map_err(|err| MediumError::Backend(err.to_string()))?;
        self.medium.set(RECORDS_KEY, &bytes)
    }

    /// Remove the collection key entirely.
    pub(crate) fn clear(&self) -> Result<(), MediumError> {
        self.medium.remove(RECORDS_KEY)
    }

    /// Bytes used by every key this application owns, not just the
    /// collection slot. Accounting failures read as zero.
    pub(crate) fn used_bytes(&self) -> u64 {
        self.medium.used_bytes(KEY_PREFIX).unwrap_or(0)
    }

    /// Last-resort recovery: drop every application key under the prefix.
    pub(crate) fn reset_namespace(&self) -> Result<(), MediumError> {
        for key in self.medium.keys()? {
            if key.starts_with(KEY_PREFIX) {
                self.medium.remove(&key)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diaglens_storage::MemoryMedium;

    fn setup() -> (RecordSlot, Arc<MemoryMedium>) {
        let medium = Arc::new(MemoryMedium::new());
        (RecordSlot::new(medium.clone()), medium)
    }

    #[test]
    fn test_missing_key_reads_as_empty() {
        let (slot, _medium) = setup();
        assert!(slot.read_all().is_empty());
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let (slot, _medium) = setup();
        let records = vec![
            DiagramRecord::new("one", "data:,a"),
            DiagramRecord::new("two", "data:,b"),
        ];
        slot.write_all(&records).unwrap();
        assert_eq!(slot.read_all(), records);
    }

    #[test]
    fn test_corrupt_blob_reads_as_empty() {
        let (slot, medium) = setup();
        medium.set(RECORDS_KEY, b"{not json at all").unwrap();
        assert!(slot.read_all().is_empty());
    }

    #[test]
    fn test_clear_removes_only_the_collection_key() {
        let (slot, medium) = setup();
        slot.write_all(&[DiagramRecord::new("one", "data:,a")]).unwrap();
        medium.set("diaglens:meta", b"x").unwrap();

        slot.clear().unwrap();
        assert!(slot.read_all().is_empty());
        assert!(medium.get("diaglens:meta").unwrap().is_some());
    }

    #[test]
    fn test_reset_namespace_spares_foreign_keys() {
        let (slot, medium) = setup();
        slot.write_all(&[DiagramRecord::new("one", "data:,a")]).unwrap();
        medium.set("diaglens:meta", b"x").unwrap();
        medium.set("other-app", b"y").unwrap();

        slot.reset_namespace().unwrap();
        assert!(medium.get(RECORDS_KEY).unwrap().is_none());
        assert!(medium.get("diaglens:meta").unwrap().is_none());
        assert!(medium.get("other-app").unwrap().is_some());
    }

    #[test]
    fn test_used_bytes_covers_the_namespace() {
        let (slot, medium) = setup();
        assert_eq!(slot.used_bytes(), 0);

        slot.write_all(&[DiagramRecord::new("one", "data:,a")]).unwrap();
        medium.set("other-app", b"yyyy").unwrap();

        let blob = medium.get(RECORDS_KEY).unwrap().unwrap();
        assert_eq!(slot.used_bytes(), (RECORDS_KEY.len() + blob.len()) as u64);
    }
}
