//! Eviction policy - count caps and the quota-recovery loop.

use diaglens_models::{ChatMessage, DiagramRecord};

use crate::error::{Result, StoreError};
use crate::store::records::RecordSlot;

/// Maximum number of stored records after any successful save.
pub const MAX_RECORDS: usize = 20;
/// Maximum chat history length per record.
pub const MAX_HISTORY: usize = 50;

/// Sort newest-updated-first and truncate to [`MAX_RECORDS`].
///
/// The sort is stable, so records with equal timestamps keep their relative
/// order.
pub(crate) fn cap_record_count(records: &mut Vec<DiagramRecord>) {
    records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    records.truncate(MAX_RECORDS);
}

/// Keep only the trailing [`MAX_HISTORY`] messages, dropping the oldest.
pub(crate) fn cap_history(history: &mut Vec<ChatMessage>) {
    if history.len() > MAX_HISTORY {
        history.drain(..history.len() - MAX_HISTORY);
    }
}

/// Recover from a failed collection write by shedding old records.
///
/// `records` must be sorted newest-updated-first with the just-saved record
/// included. Drops the oldest record and retries the write while more than
/// one remains; once down to a single record, resets the application
/// namespace and force-writes `[current]`. Terminates in at most
/// [`MAX_RECORDS`] retries plus one reset; older records may be silently
/// discarded so the newest write survives.
pub(crate) fn recover_from_quota_exceeded(
    slot: &RecordSlot,
    records: &mut Vec<DiagramRecord>,
    current: &DiagramRecord,
) -> Result<()> {
    while records.len() > 1 {
        records.pop();
        if slot.write_all(records).is_ok() {
            tracing::warn!(
                "storage recovered after reducing to {} records",
                records.len()
            );
            return Ok(());
        }
    }

    tracing::info!("resetting storage namespace to persist the current record");
    slot.reset_namespace()
        .map_err(|_| StoreError::StorageExhausted)?;

    let only = vec![current.clone()];
    match slot.write_all(&only) {
        Ok(()) => {
            *records = only;
            Ok(())
        }
        Err(_) => Err(StoreError::StorageExhausted),
    }
}
