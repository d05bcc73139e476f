//! The JSON-backed event log and its context-window construction.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use praxis_types::{ContextMessage, MemoryEntry, MemoryError, Summarizer};

/// The complete persisted state: running summary plus event history.
#[derive(Debug, Default, Serialize, Deserialize)]
struct MemoryState {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    history: Vec<MemoryEntry>,
}

/// Append-only event log with JSON persistence.
///
/// Every mutation synchronously rewrites the full document. The store
/// assumes a single process and a single writer; concurrent external
/// writers to the persisted file are out of contract.
pub struct MemoryStore {
    path: PathBuf,
    state: MemoryState,
}

impl MemoryStore {
    /// Open a store backed by `path`, loading any existing document.
    ///
    /// Fails open: a missing, unreadable, or unparseable file yields an
    /// empty state (logged) rather than an error.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => MemoryState::default(),
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(state) => state,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "memory file unparseable, starting fresh");
                    MemoryState::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MemoryState::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "memory file unreadable, starting fresh");
                MemoryState::default()
            }
        };
        Self { path, state }
    }

    /// Append one immutable entry and rewrite the persisted document.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError`] when the rewrite fails; the entry is still
    /// present in memory, so callers may log and continue.
    pub fn append(
        &mut self,
        role: impl Into<String>,
        content: impl Into<String>,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), MemoryError> {
        let mut entry = MemoryEntry::new(role, content);
        entry.metadata = metadata;
        self.state.history.push(entry);
        self.persist()
    }

    /// The raw event stream, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MemoryEntry] {
        &self.state.history
    }

    /// The current running summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.state.summary
    }

    /// Reset summary and history to empty and persist the reset.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError`] when the rewrite fails.
    pub fn clear(&mut self) -> Result<(), MemoryError> {
        self.state = MemoryState::default();
        self.persist()
    }

    /// Build a bounded, role-tagged context window.
    ///
    /// The window always begins with a system entry built from
    /// `system_prompt`. When the history holds at most `max_messages`
    /// entries it is returned verbatim and the summarizer is never
    /// consulted. Otherwise the older slice is folded into the stored
    /// summary via `summarizer` (which replaces and persists it) and the
    /// window becomes system + summary (when non-empty) + the most recent
    /// `max_messages` entries in order.
    ///
    /// A summarizer failure is logged and leaves the stored summary
    /// untouched; the window is still produced.
    pub fn context_window(
        &mut self,
        system_prompt: &str,
        max_messages: usize,
        summarizer: &dyn Summarizer,
    ) -> Vec<ContextMessage> {
        let mut window = vec![ContextMessage::new("system", system_prompt)];

        if self.state.history.len() <= max_messages {
            window.extend(self.state.history.iter().map(entry_to_message));
            return window;
        }

        let split = self.state.history.len() - max_messages;
        match summarizer.summarize(&self.state.history[..split], &self.state.summary) {
            Ok(summary) => {
                self.state.summary = summary;
                if let Err(e) = self.persist() {
                    warn!(error = %e, "failed to persist refreshed summary");
                }
            }
            Err(e) => warn!(error = %e, "summarizer failed, keeping previous summary"),
        }

        if !self.state.summary.is_empty() {
            window.push(ContextMessage::new(
                "system",
                format!("Earlier conversation summary:\n{}", self.state.summary),
            ));
        }
        window.extend(self.state.history[split..].iter().map(entry_to_message));
        window
    }

    fn persist(&self) -> Result<(), MemoryError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| MemoryError::Write(e.to_string()))?;
        }
        let contents = serde_json::to_string_pretty(&self.state)
            .map_err(|e| MemoryError::Serialization(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| MemoryError::Write(e.to_string()))
    }
}

fn entry_to_message(entry: &MemoryEntry) -> ContextMessage {
    ContextMessage::new(entry.role.clone(), entry.content.clone())
}
