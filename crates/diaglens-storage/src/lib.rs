//! Diaglens storage - quota-bounded byte-level key-value media.
//!
//! This crate provides the persistence substrate for diaglens: a small
//! `StorageMedium` abstraction over string-keyed byte slots with a hard
//! total-size quota, plus two implementations:
//!
//! - `RedbMedium` - durable storage in a single redb table
//! - `MemoryMedium` - in-memory storage for tests and ephemeral sessions
//!
//! Both media meter the quota identically (key length + value length per
//! entry), so eviction behavior exercised against the in-memory medium is
//! the behavior of the durable one. Record types and eviction policy live
//! in diaglens-core.

pub mod medium;
pub mod memory;
pub mod paths;
pub mod redb_medium;

pub use medium::{DEFAULT_QUOTA_BYTES, MediumError, StorageMedium};
pub use memory::MemoryMedium;
pub use redb_medium::RedbMedium;
