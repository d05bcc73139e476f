//! The kernel itself: boot, the phase cycle, and teardown.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use praxis_memory::MemoryStore;
use praxis_mcp::{ConnectionManager, SyncConnectionManager};
use praxis_tool::{CapabilityRegistry, builtin_capabilities};
use praxis_types::{Args, Capability, ContextMessage, KernelError, ModelGateway};

use crate::audit::AuditTrail;
use crate::config::KernelConfig;
use crate::extract::extract_capability_call;
use crate::state::AgentState;
use crate::summarizer::GatewaySummarizer;

/// Marker whose first occurrence in a mission line carries the objective.
const MISSION_MARKER: &str = "Objective:";

/// Objective used when the mission document or marker is absent.
const DEFAULT_OBJECTIVE: &str = "Idle";

/// Observation text for a decision naming an unregistered capability.
const TOOL_NOT_FOUND: &str = "Error: tool not found.";

/// The execution kernel. Owns the cognitive state, memory substrate,
/// capability registry, and, when enabled, the remote connection manager.
///
/// A kernel processes one task at a time: the loop is single-threaded and
/// strictly sequential, and the state carries no internal synchronization.
/// Concurrent `run` calls on one instance are unsupported and must be
/// serialized by the caller.
pub struct Kernel<G: ModelGateway> {
    state: AgentState,
    config: KernelConfig,
    gateway: G,
    memory: MemoryStore,
    registry: CapabilityRegistry,
    connections: Option<SyncConnectionManager>,
    audit: AuditTrail,
}

impl<G: ModelGateway> Kernel<G> {
    /// Start building a kernel around `gateway`.
    #[must_use]
    pub fn builder(gateway: G) -> KernelBuilder<G> {
        KernelBuilder {
            gateway,
            config: KernelConfig::default(),
            extra: Vec::new(),
        }
    }

    /// Boot a kernel with the built-in capability set.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError`] when the audit directory cannot be
    /// prepared. Everything else fails open: a missing mission document
    /// yields the default objective, a corrupt memory file yields an empty
    /// store, and remote connection failures are contained per server.
    pub fn boot(gateway: G, config: KernelConfig) -> Result<Self, KernelError> {
        Self::boot_with(gateway, config, Vec::new())
    }

    fn boot_with(
        gateway: G,
        config: KernelConfig,
        extra: Vec<Arc<dyn Capability>>,
    ) -> Result<Self, KernelError> {
        let mut state = AgentState::default();
        info!(phase = %state.phase, "kernel boot");

        state.mission_objective = load_mission_objective(&config.mission_path);
        info!(objective = %state.mission_objective, "mission loaded");

        let memory = MemoryStore::open(&config.memory_path);
        let audit = AuditTrail::create(&config.audit_dir)?;

        let mut registry = CapabilityRegistry::new();
        for capability in builtin_capabilities() {
            registry.register(capability);
        }
        for capability in extra {
            registry.register(capability);
        }

        let mut connections = None;
        if config.mcp_enabled {
            let manager =
                SyncConnectionManager::new(ConnectionManager::new(&config.manifest_path));
            manager.initialize();

            let proxies = manager.capability_proxies(&config.capability_prefix);
            if !proxies.is_empty() {
                state.mcp_active = true;
                info!(remote = proxies.len(), "remote capabilities linked");
            }
            for proxy in proxies {
                // Remote capabilities shadow identically-named locals.
                registry.register(proxy);
            }
            connections = Some(manager);
        }

        state.tools_loaded = registry.len();
        info!(capabilities = state.tools_loaded, "registry populated");

        let mut kernel = Self {
            state,
            config,
            gateway,
            memory,
            registry,
            connections,
            audit,
        };
        kernel.advance();
        Ok(kernel)
    }

    /// Current cognitive state.
    #[must_use]
    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// The memory substrate.
    #[must_use]
    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Where this boot's audit trail is written.
    #[must_use]
    pub fn audit_path(&self) -> &Path {
        self.audit.path()
    }

    /// Execute one task through the full cycle and return the final
    /// observation.
    ///
    /// Every externally triggered fault inside the cycle (a gateway
    /// outage, an unknown capability, a capability failure) is rendered
    /// into observation text consumed by the next phase.
    /// [`shutdown`](Self::shutdown) runs unconditionally afterwards, and
    /// the kernel always lands back in IDLE.
    pub fn run(&mut self, task: &str) -> String {
        info!(task, "execution start");
        let observation = self.cycle(task);
        self.shutdown();
        info!("execution finished");
        observation
    }

    fn cycle(&mut self, task: &str) -> String {
        self.observe(task);
        let context = self.orient();
        let call = self.decide(task, &context);
        self.act(task, call);
        self.reflect(task);
        self.state.observation.clone().unwrap_or_default()
    }

    /// Release all remote connections.
    ///
    /// Always safe to call; failures are contained per connection inside
    /// the manager.
    pub fn shutdown(&mut self) {
        if let Some(connections) = &self.connections {
            connections.shutdown();
        }
        info!("kernel offline");
    }

    fn advance(&mut self) {
        let next = self.state.phase.successor();
        info!(from = %self.state.phase, to = %next, "phase transition");
        self.state.phase = next;
    }

    /// One blocking gateway call; failures become sentinel text.
    fn query(&self, prompt: &str) -> String {
        match self.gateway.generate(&self.config.model, prompt) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "model gateway call failed");
                format!("Error: model gateway unavailable ({e}).")
            }
        }
    }

    fn remember(
        &mut self,
        role: &str,
        content: &str,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) {
        if let Err(e) = self.memory.append(role, content, metadata) {
            warn!(error = %e, "memory append failed");
        }
    }

    fn record_audit(&self, stage: &str, content: &str) {
        if let Err(e) = self.audit.record(stage, content) {
            warn!(error = %e, "audit append failed");
        }
    }

    /// Phase 1: ingest the task.
    fn observe(&mut self, task: &str) {
        self.advance();
        self.state.current_task = Some(task.to_string());
        self.remember("user", task, serde_json::Map::new());
        info!(task, "task ingested");
    }

    /// Phase 2: assemble the capability listing and context window.
    fn orient(&mut self) -> Vec<ContextMessage> {
        self.advance();
        let listing = self.registry.listing();
        self.state.last_thought = format!(
            "Loaded {} capabilities. Assembling context.",
            self.state.tools_loaded
        );

        let system_prompt = format!(
            "You are an autonomous engineering agent.\n\
             MISSION: {}\n\
             AVAILABLE TOOLS:\n{}\n\n\
             To invoke a tool, reply with a JSON object: \
             {{\"action\": \"tool_name\", \"args\": {{...}}}}.\n\
             Otherwise, reply with the final answer.",
            self.state.mission_objective, listing,
        );

        let summarizer = GatewaySummarizer::new(&self.gateway, &self.config.model);
        self.memory
            .context_window(&system_prompt, self.config.context_window, &summarizer)
    }

    /// Phase 3: one gateway call, then structured-call extraction.
    fn decide(&mut self, task: &str, context: &[ContextMessage]) -> Option<(String, Args)> {
        self.advance();

        let rendered: Vec<String> = context
            .iter()
            .map(|message| format!("{}: {}", message.role.to_uppercase(), message.content))
            .collect();
        let prompt = format!("{}\n\nUSER TASK: {task}", rendered.join("\n"));

        info!("querying model gateway");
        let decision = self.query(&prompt);
        self.state.decision = Some(decision.clone());
        self.record_audit("DECISION", &decision);

        extract_capability_call(&decision)
    }

    /// Phase 4: execute the capability (if any) and synthesize the answer.
    fn act(&mut self, task: &str, call: Option<(String, Args)>) {
        self.advance();

        let decision = self.state.decision.clone().unwrap_or_default();

        let Some((name, args)) = call else {
            info!("no capability requested, decision is the final answer");
            self.state.observation = self.state.decision.clone();
            return;
        };

        info!(capability = %name, "invoking capability");
        let observation = match self.registry.get(&name) {
            None => TOOL_NOT_FOUND.to_string(),
            Some(capability) => match capability.invoke(&args) {
                Ok(output) => output,
                Err(e) => format!("Tool Failure: {e}"),
            },
        };
        self.state.observation = Some(observation.clone());

        self.remember("assistant", &decision, serde_json::Map::new());
        let mut metadata = serde_json::Map::new();
        metadata.insert("tool".to_string(), serde_json::Value::String(name));
        self.remember("tool", &observation, metadata);

        info!("synthesizing capability output");
        let synthesis_prompt = format!(
            "TASK: {task}\nDECISION: {decision}\nTOOL OUTPUT: {observation}\n\
             Provide the final answer based on the tool output."
        );
        let final_answer = self.query(&synthesis_prompt);
        self.state.observation = Some(final_answer.clone());
        self.remember("assistant", &final_answer, serde_json::Map::new());
    }

    /// Phase 5: classify the outcome and record the insight.
    fn reflect(&mut self, task: &str) {
        self.advance();

        let observation = self.state.observation.clone().unwrap_or_default();
        let failed = is_failure(&observation);
        let (framing, instruction) = if failed {
            (
                "critical analysis",
                "analyze why the task failed and propose a fix.",
            )
        } else {
            (
                "reinforcement",
                "analyze why the task succeeded and consolidate the strategy.",
            )
        };

        let prompt = format!(
            "GOAL: {}\nTASK: {task}\nDECISION: {}\nOUTCOME: {observation}\n\
             Perform a {framing}: {instruction}",
            self.state.mission_objective,
            self.state.decision.clone().unwrap_or_default(),
        );

        info!(failed, "generating reflection");
        let insight = self.query(&prompt);
        self.record_audit("REFLECTION", &insight);

        let mut metadata = serde_json::Map::new();
        metadata.insert(
            "reflection".to_string(),
            serde_json::Value::String(
                if failed {
                    "critical_analysis"
                } else {
                    "reinforcement"
                }
                .to_string(),
            ),
        );
        self.remember("system", &format!("REFLECTION: {insight}"), metadata);

        self.advance();
    }
}

/// Builder for a [`Kernel`] with optional configuration and extra
/// capabilities registered at boot.
pub struct KernelBuilder<G: ModelGateway> {
    gateway: G,
    config: KernelConfig,
    extra: Vec<Arc<dyn Capability>>,
}

impl<G: ModelGateway> KernelBuilder<G> {
    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: KernelConfig) -> Self {
        self.config = config;
        self
    }

    /// Register an additional local capability at boot.
    ///
    /// Registration order matters: remote proxies are merged afterwards
    /// and shadow identically-named entries.
    #[must_use]
    pub fn capability(mut self, capability: Arc<dyn Capability>) -> Self {
        self.extra.push(capability);
        self
    }

    /// Boot the kernel.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError`] when the audit directory cannot be
    /// prepared.
    pub fn boot(self) -> Result<Kernel<G>, KernelError> {
        Kernel::boot_with(self.gateway, self.config, self.extra)
    }
}

/// Whether observation text marks the outcome as a failure.
fn is_failure(observation: &str) -> bool {
    let lower = observation.to_lowercase();
    ["error", "failed", "failure"]
        .iter()
        .any(|keyword| lower.contains(keyword))
}

/// Read the mission objective from the document at `path`.
///
/// The first line containing the marker supplies the objective as the
/// remainder of that line; a missing file or marker yields the default.
fn load_mission_objective(path: &Path) -> String {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return DEFAULT_OBJECTIVE.to_string();
    };
    for line in contents.lines() {
        if let Some(index) = line.find(MISSION_MARKER) {
            let objective = line[index + MISSION_MARKER.len()..].trim();
            if !objective.is_empty() {
                return objective.to_string();
            }
        }
    }
    DEFAULT_OBJECTIVE.to_string()
}
