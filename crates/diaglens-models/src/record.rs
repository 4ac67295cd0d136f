//! Diagram analysis session records.

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;
use crate::ids::generate_id;

/// One stored diagram analysis session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagramRecord {
    pub id: String,
    pub title: String,
    /// Encoded image payload as a `data:` URI.
    pub image_data: String,
    /// Architecture quality rating (1-10), derived by the collaborator from
    /// the conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// First generated analysis text; write-once in practice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub created_at: i64,
    /// Set by the store on every successful persist; monotonically
    /// non-decreasing for a given record.
    pub updated_at: i64,
}

impl DiagramRecord {
    /// Create a fresh record with an empty history and no rating.
    pub fn new(title: impl Into<String>, image_data: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: generate_id(),
            title: title.into(),
            image_data: image_data.into(),
            rating: None,
            summary: None,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Read-only storage usage snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StorageUsage {
    pub used_bytes: u64,
    pub record_count: usize,
    pub oldest_created_at: Option<i64>,
}
