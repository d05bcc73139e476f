//! Error types for all praxis crates.

use thiserror::Error;

/// Errors from model gateway calls.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network-level failure reaching the gateway.
    #[error("network error: {0}")]
    Network(String),

    /// The gateway answered with a non-success status.
    #[error("gateway returned status {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or status text.
        message: String,
    },

    /// The gateway response could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Catch-all.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from capability lookup and execution.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// No capability with this name is registered.
    #[error("capability not found: {0}")]
    NotFound(String),

    /// The arguments did not match what the capability expects.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The capability ran and failed.
    #[error("execution failed: {0}")]
    ExecutionFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from the memory substrate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MemoryError {
    /// Rewriting the persisted document failed.
    #[error("write failed: {0}")]
    Write(String),

    /// Serializing the in-memory state failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A summarizer failed to produce a replacement summary.
    #[error("summarization failed: {0}")]
    Summarization(String),
}

/// Errors from the connection manager and sync bridge.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum McpError {
    /// A server descriptor is unusable: missing command or url, or an
    /// unrecognized transport kind.
    #[error("configuration error: {0}")]
    Config(String),

    /// Establishing the transport or the protocol handshake failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The transport needs support that was compiled out of this build.
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    /// A protocol-level request failed after connecting.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The sync bridge could not execute the operation.
    #[error("bridge error: {0}")]
    Bridge(String),
}

/// Errors from kernel construction.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum KernelError {
    /// The boot sequence could not complete.
    #[error("boot failed: {0}")]
    Boot(String),

    /// An I/O failure while preparing kernel directories or files.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
