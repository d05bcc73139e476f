#![deny(missing_docs)]
//! The execution kernel: a cyclic controller that ingests a task, consults
//! a model gateway for a decision, optionally invokes a named capability,
//! and records an auditable trace of the interaction.
//!
//! One `run` drives the fixed phase cycle observe → orient → decide → act
//! → reflect. Every externally triggered fault degrades to observation
//! text consumed by the next phase; teardown always executes.

pub mod audit;
pub mod config;
pub mod extract;
pub mod kernel;
pub mod state;
pub mod summarizer;

pub use audit::AuditTrail;
pub use config::KernelConfig;
pub use extract::extract_capability_call;
pub use kernel::{Kernel, KernelBuilder};
pub use state::{AgentState, Phase};
pub use summarizer::GatewaySummarizer;
