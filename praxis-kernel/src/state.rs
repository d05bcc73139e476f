//! Kernel phases and cognitive state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Execution phase of the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// One-time construction phase.
    Boot,
    /// Ingesting the task.
    Observe,
    /// Assembling capabilities and context.
    Orient,
    /// Querying the model for the next action.
    Decide,
    /// Executing the chosen action.
    Act,
    /// Auditing the outcome.
    Reflect,
    /// Between runs.
    Idle,
}

impl Phase {
    /// The only legal next phase.
    ///
    /// The cycle is fixed:
    /// BOOT → IDLE → OBSERVE → ORIENT → DECIDE → ACT → REFLECT → IDLE.
    /// The kernel advances strictly by successor, which makes skipped or
    /// repeated phases unrepresentable.
    #[must_use]
    pub fn successor(self) -> Phase {
        match self {
            Phase::Boot => Phase::Idle,
            Phase::Idle => Phase::Observe,
            Phase::Observe => Phase::Orient,
            Phase::Orient => Phase::Decide,
            Phase::Decide => Phase::Act,
            Phase::Act => Phase::Reflect,
            Phase::Reflect => Phase::Idle,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Boot => "BOOT",
            Phase::Observe => "OBSERVE",
            Phase::Orient => "ORIENT",
            Phase::Decide => "DECIDE",
            Phase::Act => "ACT",
            Phase::Reflect => "REFLECT",
            Phase::Idle => "IDLE",
        };
        f.write_str(label)
    }
}

/// The kernel's cognitive state. One live instance per kernel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    /// Current phase of the execution cycle.
    pub phase: Phase,
    /// Objective extracted from the mission document.
    pub mission_objective: String,
    /// Number of capabilities in the registry after boot.
    pub tools_loaded: usize,
    /// Whether remote capabilities were linked at boot.
    pub mcp_active: bool,
    /// Most recent internal note.
    pub last_thought: String,
    /// Task currently being executed.
    pub current_task: Option<String>,
    /// Latest observation produced by the cycle.
    pub observation: Option<String>,
    /// Raw model response from the decision phase.
    pub decision: Option<String>,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            phase: Phase::Boot,
            mission_objective: "Idle".to_string(),
            tools_loaded: 0,
            mcp_active: false,
            last_thought: String::new(),
            current_task: None,
            observation: None,
            decision: None,
        }
    }
}
