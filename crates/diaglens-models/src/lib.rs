//! Diaglens data model - diagram analysis sessions and their chat transcripts.
//!
//! These types are plain serde structs shared by the storage and core
//! crates. All timestamps are Unix epoch milliseconds.

pub mod chat;
pub mod ids;
pub mod record;

pub use chat::{ChatMessage, ChatRole};
pub use ids::generate_id;
pub use record::{DiagramRecord, StorageUsage};
