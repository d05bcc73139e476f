//! Wire-facing data for discovered remote capabilities.

use serde::{Deserialize, Serialize};

/// A capability advertised by a connected server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteCapability {
    /// Name as advertised by the server.
    pub name: String,
    /// Server-supplied documentation text.
    pub description: String,
    /// JSON Schema for the capability's arguments.
    pub input_schema: serde_json::Value,
    /// Name of the owning server.
    pub server: String,
}

/// Registry key for a remote capability: `<prefix><server>_<name>`.
#[must_use]
pub fn proxy_key(prefix: &str, server: &str, name: &str) -> String {
    format!("{prefix}{server}_{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_key_concatenates_prefix_server_and_name() {
        assert_eq!(proxy_key("mcp_", "github", "search"), "mcp_github_search");
        assert_eq!(proxy_key("", "fs", "read"), "fs_read");
    }
}
