#![deny(missing_docs)]
//! Connection manager for remote capability servers plus the sync bridge
//! that makes it callable from the kernel's blocking loop.
//!
//! Three pieces:
//!
//! - [`ConnectionManager`] owns the per-server lifecycle across three
//!   transport kinds (stdio subprocess, streamable HTTP, SSE), discovers
//!   each server's capabilities, and tears everything down at shutdown.
//! - [`RemoteProxy`] wraps one discovered capability as a synchronous
//!   [`Capability`](praxis_types::Capability) ready for registry
//!   registration.
//! - [`SyncBridge`] executes the manager's async operations on a cached
//!   runtime so a single-threaded caller never sees a future.

pub mod bridge;
pub mod config;
pub mod manager;
pub mod proxy;
pub mod sync;
pub mod types;

pub use bridge::SyncBridge;
pub use config::{ServerDescriptor, TransportKind, load_manifest};
pub use manager::{ConnectionManager, ConnectionStatus};
pub use proxy::RemoteProxy;
pub use sync::SyncConnectionManager;
pub use types::RemoteCapability;
