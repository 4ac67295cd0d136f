//! Session persistence facade.
//!
//! `DiagramStore` composes the codec, record slot, and eviction policy into
//! the public operation set: whole-collection reads, upserting saves with
//! image compression and quota recovery, idempotent deletes, and usage
//! introspection. A single in-process lock serializes the read-mutate-write
//! save pipeline; writers in other processes remain last-write-wins with
//! advisory change notification only.

mod eviction;
mod records;

pub use eviction::{MAX_HISTORY, MAX_RECORDS};

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, broadcast};

use diaglens_models::{ChatMessage, DiagramRecord, StorageUsage};
use diaglens_storage::{RedbMedium, StorageMedium};

use crate::codec::{CodecConfig, compress_image};
use crate::error::Result;
use eviction::{cap_history, cap_record_count, recover_from_quota_exceeded};
use records::RecordSlot;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Change notification fired after every successful mutation.
///
/// Advisory only: observers should re-read the store rather than attempt an
/// incremental merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Saved { id: String },
    Deleted { id: String },
    Cleared,
}

/// Capacity-bounded store for diagram analysis sessions.
///
/// Constructed once at startup and passed by reference to all callers; there
/// is no process-wide singleton.
pub struct DiagramStore {
    slot: RecordSlot,
    codec: CodecConfig,
    save_lock: Mutex<()>,
    events: broadcast::Sender<StoreEvent>,
}

impl DiagramStore {
    /// Create a store over the given medium with the default codec settings.
    pub fn new(medium: Arc<dyn StorageMedium>) -> Self {
        Self::with_codec(medium, CodecConfig::default())
    }

    pub fn with_codec(medium: Arc<dyn StorageMedium>, codec: CodecConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            slot: RecordSlot::new(medium),
            codec,
            save_lock: Mutex::new(()),
            events,
        }
    }

    /// Open the durable store under the diaglens data directory.
    pub fn open_default() -> anyhow::Result<Self> {
        diaglens_storage::paths::ensure_diaglens_dir()?;
        let path = diaglens_storage::paths::database_path()?;
        let medium = RedbMedium::new(path)?;
        Ok(Self::new(Arc::new(medium)))
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// All records, newest-updated-first.
    pub fn get_all(&self) -> Vec<DiagramRecord> {
        let mut records = self.slot.read_all();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        records
    }

    /// Look up a single record by id.
    pub fn get(&self, id: &str) -> Option<DiagramRecord> {
        self.get_all().into_iter().find(|r| r.id == id)
    }

    /// Persist `record`, compressing a changed image and evicting as needed.
    ///
    /// The image is recompressed only when the record is new or its payload
    /// differs from the stored version. The save succeeds once any
    /// (possibly reduced) collection containing the record is written;
    /// [`StoreError::StorageExhausted`](crate::StoreError::StorageExhausted)
    /// is returned only when even a single-record write after a namespace
    /// reset fails. The caller's in-memory copy stays valid either way.
    pub async fn save(&self, record: DiagramRecord) -> Result<()> {
        let _guard = self.save_lock.lock().await;
        self.save_locked(record).await
    }

    // Runs the save pipeline; the caller must hold `save_lock`.
    async fn save_locked(&self, mut record: DiagramRecord) -> Result<()> {
        let mut records = self.slot.read_all();
        let existing = records.iter().position(|r| r.id == record.id);

        let image_changed = match existing {
            Some(index) => records[index].image_data != record.image_data,
            None => true,
        };
        if image_changed {
            let codec = self.codec;
            let original = record.image_data.clone();
            // Pixel decode is CPU-bound; run it off the async executor. A
            // failed task keeps the original payload, like any codec failure.
            if let Ok(compressed) =
                tokio::task::spawn_blocking(move || compress_image(&original, &codec)).await
            {
                record.image_data = compressed;
            }
        }

        cap_history(&mut record.history);

        let now = Utc::now().timestamp_millis();
        let previous = existing.map(|i| records[i].updated_at).unwrap_or(i64::MIN);
        // Non-decreasing even if the clock stepped backwards.
        record.updated_at = now.max(previous);

        match existing {
            Some(index) => records[index] = record.clone(),
            None => records.insert(0, record.clone()),
        }
        cap_record_count(&mut records);

        if let Err(err) = self.slot.write_all(&records) {
            tracing::warn!("collection write failed ({err}), shedding old records");
            recover_from_quota_exceeded(&self.slot, &mut records, &record)?;
        }

        tracing::debug!("persisted record {} ({} stored)", record.id, records.len());
        let _ = self.events.send(StoreEvent::Saved { id: record.id });
        Ok(())
    }

    /// Remove the record with `id`; a no-op without error when absent.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.save_lock.lock().await;

        let mut records = self.slot.read_all();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(());
        }

        self.slot.write_all(&records)?;
        let _ = self.events.send(StoreEvent::Deleted { id: id.to_string() });
        Ok(())
    }

    /// Append one message to a record's history and persist it.
    ///
    /// A no-op when the record does not exist. The read and the persist
    /// happen under the store's save lock, so concurrent appends to the
    /// same record cannot drop each other's messages.
    pub async fn append_message(&self, id: &str, message: ChatMessage) -> Result<()> {
        let _guard = self.save_lock.lock().await;
        let records = self.slot.read_all();
        let Some(mut record) = records.into_iter().find(|r| r.id == id) else {
            return Ok(());
        };
        record.history.push(message);
        self.save_locked(record).await
    }

    /// Remove the entire collection.
    pub async fn clear_all(&self) -> Result<()> {
        let _guard = self.save_lock.lock().await;
        self.slot.clear()?;
        let _ = self.events.send(StoreEvent::Cleared);
        Ok(())
    }

    /// Read-only usage snapshot: bytes owned by the application, record
    /// count, and the oldest creation timestamp.
    pub fn usage_info(&self) -> StorageUsage {
        let records = self.slot.read_all();
        StorageUsage {
            used_bytes: self.slot.used_bytes(),
            record_count: records.len(),
            oldest_created_at: records.iter().map(|r| r.created_at).min(),
        }
    }
}
