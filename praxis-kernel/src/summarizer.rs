//! Gateway-backed history summarization for the orient phase.

use praxis_types::{MemoryEntry, MemoryError, ModelGateway, Summarizer};

/// Folds older history entries through the model gateway.
///
/// A failure here is absorbed by the memory store, which keeps its
/// previously stored summary; context construction never aborts because
/// summarization failed.
pub struct GatewaySummarizer<'a, G: ModelGateway> {
    gateway: &'a G,
    model: &'a str,
}

impl<'a, G: ModelGateway> GatewaySummarizer<'a, G> {
    /// Borrow a gateway and model identifier for summarization.
    #[must_use]
    pub fn new(gateway: &'a G, model: &'a str) -> Self {
        Self { gateway, model }
    }
}

impl<G: ModelGateway> Summarizer for GatewaySummarizer<'_, G> {
    fn summarize(
        &self,
        older: &[MemoryEntry],
        previous_summary: &str,
    ) -> Result<String, MemoryError> {
        let mut prompt = String::from(
            "Condense the following agent history into a short summary that \
             preserves decisions, outcomes, and open threads.\n",
        );
        if !previous_summary.is_empty() {
            prompt.push_str("\nPrevious summary:\n");
            prompt.push_str(previous_summary);
            prompt.push('\n');
        }
        prompt.push_str("\nEntries:\n");
        for entry in older {
            prompt.push_str(&entry.role);
            prompt.push_str(": ");
            prompt.push_str(&entry.content);
            prompt.push('\n');
        }

        self.gateway
            .generate(self.model, &prompt)
            .map_err(|e| MemoryError::Summarization(e.to_string()))
    }
}
