//! Synthesized local capabilities that forward to remote servers.

use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rmcp::model::{CallToolRequestParams, CallToolResult, RawContent};
use rmcp::service::{Peer, RoleClient};

use praxis_types::{Args, Capability, CapabilityError};

use crate::bridge::SyncBridge;
use crate::types::RemoteCapability;

/// Returned instead of an error when a proxy's connection is down.
pub const CONNECTION_LOST: &str = "Error: server connection lost.";

/// A registry-ready capability that forwards invocations to a remote
/// server through the sync bridge.
///
/// Stateless beyond the session handle and capability definition it
/// closes over.
pub struct RemoteProxy {
    registered_name: String,
    description: String,
    capability: RemoteCapability,
    peer: Peer<RoleClient>,
    connected: Arc<AtomicBool>,
    bridge: Arc<SyncBridge>,
}

impl RemoteProxy {
    pub(crate) fn new(
        registered_name: String,
        capability: RemoteCapability,
        peer: Peer<RoleClient>,
        connected: Arc<AtomicBool>,
        bridge: Arc<SyncBridge>,
    ) -> Self {
        let description = format!("[{}] {}", capability.server, capability.description);
        Self {
            registered_name,
            description,
            capability,
            peer,
            connected,
            bridge,
        }
    }
}

impl Capability for RemoteProxy {
    fn name(&self) -> &str {
        &self.registered_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> serde_json::Value {
        self.capability.input_schema.clone()
    }

    fn invoke(&self, args: &Args) -> Result<String, CapabilityError> {
        if !self.connected.load(Ordering::SeqCst) {
            return Ok(CONNECTION_LOST.to_string());
        }

        let params = CallToolRequestParams {
            meta: None,
            name: Cow::Owned(self.capability.name.clone()),
            arguments: if args.is_empty() {
                None
            } else {
                Some(args.clone())
            },
            task: None,
        };
        let peer = self.peer.clone();

        let result = self
            .bridge
            .run(async move { peer.call_tool(params).await })
            .map_err(|e| CapabilityError::ExecutionFailed(e.to_string().into()))?
            .map_err(|e| CapabilityError::ExecutionFailed(e.to_string().into()))?;

        Ok(render_result(&result))
    }
}

/// Render a heterogeneous tool result: text segments joined with newlines,
/// binary segments as a byte-count placeholder.
fn render_result(result: &CallToolResult) -> String {
    let mut segments = Vec::new();
    for content in &result.content {
        match &content.raw {
            RawContent::Text(text) => segments.push(text.text.clone()),
            RawContent::Image(image) => {
                segments.push(format!("<binary data: {} bytes>", image.data.len()));
            }
            _ => {}
        }
    }
    segments.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    // A RemoteProxy cannot be built without a live `Peer`, so these tests
    // exercise the pieces around the forwarded call: argument packing and
    // the disconnected sentinel contract.

    #[test]
    fn empty_args_pack_to_none() {
        let args = Args::new();
        let arguments = if args.is_empty() {
            None
        } else {
            Some(args.clone())
        };
        assert!(arguments.is_none());
    }

    #[test]
    fn non_empty_args_pack_verbatim() {
        let mut args = Args::new();
        args.insert("query".to_string(), serde_json::json!("rust"));
        let arguments = if args.is_empty() {
            None
        } else {
            Some(args.clone())
        };
        assert_eq!(
            arguments.and_then(|m| m.get("query").cloned()),
            Some(serde_json::json!("rust"))
        );
    }

    #[test]
    fn connection_lost_sentinel_reads_as_an_error_outcome() {
        // The reflect phase classifies outcomes by scanning for "error";
        // the sentinel must trip that classification.
        assert!(CONNECTION_LOST.to_lowercase().contains("error"));
    }
}
