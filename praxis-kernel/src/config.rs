//! Kernel configuration.

use std::path::PathBuf;

/// Runtime configuration for the kernel.
///
/// Constructed once at process start and handed to
/// [`Kernel::boot`](crate::Kernel::boot); nothing reads configuration from
/// globals.
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Model identifier passed to the gateway. Empty lets the gateway use
    /// its configured default.
    pub model: String,
    /// Mission document scanned for the objective marker.
    pub mission_path: PathBuf,
    /// Memory persistence file.
    pub memory_path: PathBuf,
    /// Directory receiving audit trail files.
    pub audit_dir: PathBuf,
    /// Server manifest for remote capabilities.
    pub manifest_path: PathBuf,
    /// Master switch for remote capability connectivity.
    pub mcp_enabled: bool,
    /// Prefix for registered remote capability names.
    pub capability_prefix: String,
    /// Maximum history entries returned verbatim in a context window.
    pub context_window: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            mission_path: PathBuf::from("mission.md"),
            memory_path: PathBuf::from("artifacts/memory/agent_memory.json"),
            audit_dir: PathBuf::from("artifacts/logs"),
            manifest_path: PathBuf::from("servers.json"),
            mcp_enabled: false,
            capability_prefix: "mcp_".to_string(),
            context_window: 10,
        }
    }
}
