#![deny(missing_docs)]
//! Core vocabulary shared by every praxis crate.
//!
//! Holds the [`Capability`] and [`ModelGateway`] traits, the memory-event
//! types consumed by the substrate, and one error enum per subsystem.
//! Implementation crates depend on this and nothing else from the
//! workspace.

pub mod error;
pub mod memory;
pub mod traits;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use error::*;
pub use memory::*;
pub use traits::*;
