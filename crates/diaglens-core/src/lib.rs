//! Diaglens core - capacity-bounded persistence for diagram analysis sessions.
//!
//! This crate composes the byte-level media from diaglens-storage into the
//! session store proper:
//!
//! - `codec` - best-effort image payload compression (data URI -> bounded JPEG)
//! - `store` - the `DiagramStore` facade: whole-collection reads/writes under
//!   a single storage key, count and history caps, and the quota-recovery
//!   eviction loop
//! - `rating` - extraction of "Overall Rating: N/10" scores from analysis text
//!
//! The store keeps at most [`MAX_RECORDS`] sessions, each with at most
//! [`MAX_HISTORY`] chat messages, and sheds the oldest sessions when the
//! medium rejects a write for size. A save only fails once even a
//! single-record write after a namespace reset is refused.

pub mod codec;
pub mod error;
pub mod rating;
pub mod store;

pub use codec::{CodecConfig, compress_image};
pub use error::{Result, StoreError};
pub use rating::parse_rating;
pub use store::{DiagramStore, MAX_HISTORY, MAX_RECORDS, StoreEvent};

// Re-export the data model for convenience.
pub use diaglens_models::{ChatMessage, ChatRole, DiagramRecord, StorageUsage, generate_id};
