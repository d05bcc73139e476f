#![deny(missing_docs)]
//! Capability registry: a flat namespace mapping names to invocables,
//! plus the built-in local capabilities every kernel starts with.

pub mod builtin;
pub mod registry;

pub use builtin::builtin_capabilities;
pub use registry::CapabilityRegistry;
