//! Memory-event vocabulary: history entries and context windows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MemoryError;

/// A single interaction event in the agent's history.
///
/// Entries are created through the store's append operation and never
/// mutated afterwards; a full reset is the only way to remove them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Free-form role tag (`user`, `assistant`, `tool`, `system`).
    pub role: String,
    /// The event text.
    pub content: String,
    /// Creation time, stamped once when the entry is built.
    pub timestamp: DateTime<Utc>,
    /// Open key-value bag attached by the writer.
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl MemoryEntry {
    /// Create an entry stamped with the current time and empty metadata.
    #[must_use]
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            timestamp: Utc::now(),
            metadata: serde_json::Map::new(),
        }
    }
}

/// One role/content pair of a model context window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMessage {
    /// Role tag of the originating entry.
    pub role: String,
    /// Entry text.
    pub content: String,
}

impl ContextMessage {
    /// Build a message from a role tag and content.
    #[must_use]
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Folds older history entries into a replacement summary.
///
/// Implementations may be deterministic or model-backed. A failure is
/// absorbed by the store, which keeps its previously stored summary.
pub trait Summarizer {
    /// Produce a new summary covering `older`, given the previously stored
    /// summary.
    fn summarize(
        &self,
        older: &[MemoryEntry],
        previous_summary: &str,
    ) -> Result<String, MemoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_roundtrips_through_json() {
        let mut entry = MemoryEntry::new("tool", "listing complete");
        entry
            .metadata
            .insert("tool".to_string(), serde_json::json!("list_dir"));

        let encoded = serde_json::to_string(&entry).unwrap();
        let decoded: MemoryEntry = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded.role, "tool");
        assert_eq!(decoded.content, "listing complete");
        assert_eq!(decoded.timestamp, entry.timestamp);
        assert_eq!(decoded.metadata.get("tool"), Some(&serde_json::json!("list_dir")));
    }

    #[test]
    fn entry_metadata_defaults_to_empty() {
        let decoded: MemoryEntry = serde_json::from_str(
            r#"{"role":"user","content":"hi","timestamp":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(decoded.metadata.is_empty());
    }
}
