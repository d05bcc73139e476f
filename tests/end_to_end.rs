//! End-to-end kernel runs without live services.
//!
//! Exercises the whole workspace through the `praxis` facade:
//!
//! 1. **Gateway swap** — same kernel configuration, different model
//!    backend; an unavailable backend degrades to sentinel text instead of
//!    aborting the cycle.
//! 2. **Persistent memory** — a rebooted kernel on the same memory path
//!    picks up the prior history, and compaction folds it once it outgrows
//!    the window.
//! 3. **Capability shadowing** — a later registration takes over a name,
//!    builtins included.
//! 4. **Remote servers at boot** — an unreachable capability server is
//!    contained per connection and never blocks the run.
//!
//! All tests run without a model endpoint or MCP server by scripting the
//! gateway.

use std::sync::Arc;

use praxis::prelude::*;
use praxis_types::test_utils::ScriptedGateway;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn config_in(dir: &tempfile::TempDir) -> KernelConfig {
    KernelConfig {
        mission_path: dir.path().join("mission.md"),
        memory_path: dir.path().join("memory/agent_memory.json"),
        audit_dir: dir.path().join("logs"),
        manifest_path: dir.path().join("servers.json"),
        mcp_enabled: false,
        ..KernelConfig::default()
    }
}

/// Reports a frozen clock, shadowing the builtin of the same name.
struct FrozenClock;

impl Capability for FrozenClock {
    fn name(&self) -> &str {
        "current_time"
    }

    fn description(&self) -> &str {
        "Current time, pinned for reproducible runs."
    }

    fn invoke(&self, _args: &Args) -> Result<String, CapabilityError> {
        Ok("1970-01-01T00:00:00Z".to_string())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Pattern 1: Gateway swap
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn same_config_runs_against_any_gateway() {
    let dir = tempfile::tempdir().unwrap();

    let mut kernel = Kernel::builder(ScriptedGateway::new(["All systems go.", "Noted."]))
        .config(config_in(&dir))
        .boot()
        .unwrap();
    assert_eq!(kernel.run("Self-check."), "All systems go.");
    assert_eq!(kernel.state().phase, Phase::Idle);

    // Swap in a dead backend: the cycle still completes, the outage is
    // rendered as text, and the kernel lands back in IDLE.
    let dir = tempfile::tempdir().unwrap();
    let mut kernel = Kernel::builder(ScriptedGateway::new(Vec::<String>::new()))
        .config(config_in(&dir))
        .boot()
        .unwrap();
    let observation = kernel.run("Self-check.");
    assert!(observation.starts_with("Error: model gateway unavailable"));
    assert_eq!(kernel.state().phase, Phase::Idle);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Pattern 2: Persistent memory across reboots
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn rebooted_kernel_resumes_the_same_history() {
    let dir = tempfile::tempdir().unwrap();

    let mut kernel = Kernel::builder(ScriptedGateway::new(["First answer.", "Noted."]))
        .config(config_in(&dir))
        .boot()
        .unwrap();
    kernel.run("First task.");
    assert_eq!(kernel.memory().history().len(), 2);
    drop(kernel);

    // Same memory path, fresh kernel: the prior run is still there.
    let mut kernel = Kernel::builder(ScriptedGateway::new(["Second answer.", "Noted."]))
        .config(config_in(&dir))
        .boot()
        .unwrap();
    assert_eq!(kernel.memory().history().len(), 2);
    assert_eq!(kernel.memory().history()[0].content, "First task.");

    kernel.run("Second task.");
    assert_eq!(kernel.memory().history().len(), 4);
}

#[test]
fn long_histories_are_compacted_into_a_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agent_memory.json");

    let mut store = MemoryStore::open(&path);
    for i in 0..15 {
        store
            .append("user", format!("step {i}"), serde_json::Map::new())
            .unwrap();
    }

    let window = store.context_window("sys", 10, &TruncatingSummarizer);

    // system + summary + the 10 most recent steps
    assert_eq!(window.len(), 12);
    assert!(window[1].content.contains("step 0"));
    assert_eq!(window[2].content, "step 5");
    assert_eq!(window[11].content, "step 14");

    // The refreshed summary is part of the persisted document.
    let reloaded = MemoryStore::open(&path);
    assert!(reloaded.summary().contains("step 4"));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Pattern 3: Capability shadowing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn later_registration_shadows_a_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = ScriptedGateway::new([
        r#"{"action": "current_time", "args": {}}"#,
        "The clock is frozen at the epoch.",
        "Noted.",
    ]);

    let mut kernel = Kernel::builder(gateway)
        .config(config_in(&dir))
        .capability(Arc::new(FrozenClock))
        .boot()
        .unwrap();
    kernel.run("What time is it?");

    // The tool entry carries the shadowing capability's output, not the
    // builtin clock's.
    let tool_entry = &kernel.memory().history()[2];
    assert_eq!(tool_entry.role, "tool");
    assert_eq!(tool_entry.content, "1970-01-01T00:00:00Z");
    assert_eq!(
        tool_entry.metadata.get("tool"),
        Some(&serde_json::json!("current_time"))
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Pattern 4: Remote servers at boot
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn unreachable_capability_server_never_blocks_the_run() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("servers.json"),
        r#"{ "servers": [
            { "name": "off", "command": "anything", "enabled": false },
            { "name": "ghost", "command": "/nonexistent/praxis-test-binary" }
        ] }"#,
    )
    .unwrap();

    let gateway = ScriptedGateway::new(["Running without remotes.", "Noted."]);
    let mut kernel = Kernel::builder(gateway)
        .config(KernelConfig {
            mcp_enabled: true,
            ..config_in(&dir)
        })
        .boot()
        .unwrap();

    // No remote capabilities came up, so only the builtins are loaded.
    assert!(!kernel.state().mcp_active);
    assert_eq!(kernel.state().tools_loaded, 3);

    let observation = kernel.run("Proceed anyway.");
    assert_eq!(observation, "Running without remotes.");
    assert_eq!(kernel.state().phase, Phase::Idle);
}
