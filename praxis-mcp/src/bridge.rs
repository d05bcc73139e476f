//! Blocking front door for asynchronous operations.

use std::future::Future;
use std::sync::{Mutex, OnceLock};

use tokio::runtime::{Builder, Handle, Runtime};

use praxis_types::McpError;

/// Worker threads in the bridge's dedicated runtime.
const BRIDGE_WORKERS: usize = 2;

/// Executes async operations on behalf of a blocking caller.
///
/// Owns a dedicated bounded runtime, created lazily and cached for the
/// bridge's lifetime. Every call fully resolves before returning: no
/// future or pending value ever escapes upward.
pub struct SyncBridge {
    runtime: OnceLock<Runtime>,
    init: Mutex<()>,
}

impl SyncBridge {
    /// Create a bridge. The runtime is built on first use.
    #[must_use]
    pub fn new() -> Self {
        Self {
            runtime: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    fn runtime(&self) -> Result<&Runtime, McpError> {
        if let Some(runtime) = self.runtime.get() {
            return Ok(runtime);
        }

        // Build under a guard so a racing caller cannot construct a second
        // runtime that would then be dropped inside an async context.
        let _guard = self
            .init
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(runtime) = self.runtime.get() {
            return Ok(runtime);
        }

        let runtime = Builder::new_multi_thread()
            .worker_threads(BRIDGE_WORKERS)
            .thread_name("praxis-bridge")
            .enable_all()
            .build()
            .map_err(|e| McpError::Bridge(format!("runtime construction failed: {e}")))?;

        let _ = self.runtime.set(runtime);
        self.runtime
            .get()
            .ok_or_else(|| McpError::Bridge("runtime cache unavailable".to_string()))
    }

    /// Run `future` to completion, blocking the calling thread.
    ///
    /// A call arriving while a runtime is already active on the calling
    /// thread is routed to a separate worker thread, so a caller inside
    /// async code cannot deadlock itself; the result is still fully
    /// resolved before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`McpError::Bridge`] when the runtime cannot be built or
    /// the offloaded worker panics.
    pub fn run<F>(&self, future: F) -> Result<F::Output, McpError>
    where
        F: Future + Send,
        F::Output: Send,
    {
        let runtime = self.runtime()?;
        if Handle::try_current().is_ok() {
            std::thread::scope(|scope| scope.spawn(|| runtime.block_on(future)).join())
                .map_err(|_| McpError::Bridge("bridge worker panicked".to_string()))
        } else {
            Ok(runtime.block_on(future))
        }
    }
}

impl Default for SyncBridge {
    fn default() -> Self {
        Self::new()
    }
}
