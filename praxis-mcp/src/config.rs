//! Server manifest loading.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

/// Transport kind for reaching a capability-providing node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Spawn a subprocess and speak over its standard streams.
    #[default]
    Stdio,
    /// Streamable HTTP endpoint.
    #[serde(alias = "streamable-http")]
    Http,
    /// Server-sent events endpoint, served by the HTTP path.
    Sse,
    /// A kind this build does not recognize. The entry stays in the
    /// connection table and fails at connect time, so one bad kind never
    /// affects its neighbors.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransportKind::Stdio => "stdio",
            TransportKind::Http => "http",
            TransportKind::Sse => "sse",
            TransportKind::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Configuration for one remote capability server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerDescriptor {
    /// Unique key for this server.
    pub name: String,
    /// Transport used to reach it.
    #[serde(default)]
    pub transport: TransportKind,
    /// Executable for the stdio transport.
    #[serde(default)]
    pub command: Option<String>,
    /// Arguments passed to `command`.
    #[serde(default)]
    pub args: Vec<String>,
    /// Endpoint for the http/sse transports.
    #[serde(default)]
    pub url: Option<String>,
    /// Extra environment for the spawned subprocess, merged over the
    /// inherited environment.
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Whether to connect this server at initialize.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Declared connection timeout in seconds. Carried with the
    /// descriptor; connection establishment does not enforce it.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_enabled() -> bool {
    true
}

/// Load enabled server descriptors from a JSON manifest.
///
/// A missing or unparseable manifest yields zero servers (logged, not
/// fatal). Disabled entries and individually malformed entries are
/// skipped; the rest load normally.
pub fn load_manifest(path: &Path) -> Vec<ServerDescriptor> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "server manifest unavailable");
            return Vec::new();
        }
    };

    let document: serde_json::Value = match serde_json::from_str(&contents) {
        Ok(document) => document,
        Err(e) => {
            error!(path = %path.display(), error = %e, "server manifest unparseable");
            return Vec::new();
        }
    };

    let Some(entries) = document.get("servers").and_then(|v| v.as_array()) else {
        warn!(path = %path.display(), "server manifest has no 'servers' array");
        return Vec::new();
    };

    let mut descriptors = Vec::new();
    for entry in entries {
        match serde_json::from_value::<ServerDescriptor>(entry.clone()) {
            Ok(descriptor) if descriptor.enabled => descriptors.push(descriptor),
            Ok(descriptor) => {
                debug!(server = %descriptor.name, "skipping disabled server");
            }
            Err(e) => warn!(error = %e, "skipping malformed server entry"),
        }
    }
    descriptors
}
