//! Blocking wrapper tying the connection manager to a synchronous caller.

use std::sync::Arc;

use tracing::warn;

use praxis_types::Capability;

use crate::bridge::SyncBridge;
use crate::manager::{ConnectionManager, ConnectionStatus};

/// The connection manager as seen from synchronous code.
///
/// Every method blocks until the underlying asynchronous operation has
/// fully completed; bridge failures are logged and degrade to empty
/// results, never panics.
pub struct SyncConnectionManager {
    manager: Arc<ConnectionManager>,
    bridge: Arc<SyncBridge>,
}

impl SyncConnectionManager {
    /// Wrap a manager with a fresh bridge.
    #[must_use]
    pub fn new(manager: ConnectionManager) -> Self {
        Self {
            manager: Arc::new(manager),
            bridge: Arc::new(SyncBridge::new()),
        }
    }

    /// Connect all configured servers, sequentially.
    ///
    /// Per-server failures are contained inside the manager; a bridge
    /// failure leaves the manager uninitialized and is logged here.
    pub fn initialize(&self) {
        if let Err(e) = self.bridge.run(self.manager.initialize()) {
            warn!(error = %e, "connection manager initialization failed");
        }
    }

    /// One registry-ready proxy per discovered remote capability.
    #[must_use]
    pub fn capability_proxies(&self, prefix: &str) -> Vec<Arc<dyn Capability>> {
        match self
            .bridge
            .run(self.manager.capability_proxies(prefix, &self.bridge))
        {
            Ok(proxies) => proxies
                .into_iter()
                .map(|proxy| Arc::new(proxy) as Arc<dyn Capability>)
                .collect(),
            Err(e) => {
                warn!(error = %e, "capability proxy synthesis failed");
                Vec::new()
            }
        }
    }

    /// Snapshot of the connection table.
    #[must_use]
    pub fn status(&self) -> Vec<ConnectionStatus> {
        self.bridge
            .run(self.manager.status())
            .unwrap_or_default()
    }

    /// Release every connection. Never fails upward.
    pub fn shutdown(&self) {
        if let Err(e) = self.bridge.run(self.manager.shutdown()) {
            warn!(error = %e, "connection manager shutdown failed");
        }
    }
}
