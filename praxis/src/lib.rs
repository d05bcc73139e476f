#![deny(missing_docs)]
//! # praxis — umbrella crate
//!
//! Single import surface for the praxis agent kernel. Re-exports the
//! component crates behind feature flags, plus a `prelude` for the happy
//! path.

#[cfg(feature = "gateway-ollama")]
pub use praxis_gateway_ollama;
#[cfg(feature = "kernel")]
pub use praxis_kernel;
#[cfg(feature = "mcp")]
pub use praxis_mcp;
pub use praxis_memory;
pub use praxis_tool;
pub use praxis_types;

/// Happy-path imports for composing a kernel.
pub mod prelude {
    pub use praxis_memory::{MemoryStore, TruncatingSummarizer};
    pub use praxis_tool::{CapabilityRegistry, builtin_capabilities};
    pub use praxis_types::{
        Args, Capability, CapabilityError, ContextMessage, GatewayError, MemoryEntry, ModelGateway,
    };

    #[cfg(feature = "kernel")]
    pub use praxis_kernel::{AgentState, Kernel, KernelConfig, Phase};

    #[cfg(feature = "mcp")]
    pub use praxis_mcp::{
        ConnectionManager, ServerDescriptor, SyncBridge, SyncConnectionManager, TransportKind,
    };

    #[cfg(feature = "gateway-ollama")]
    pub use praxis_gateway_ollama::OllamaGateway;
}
