//! praxis command-line entry point: boot the kernel, run one task, print
//! the result.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use praxis_gateway_ollama::OllamaGateway;
use praxis_kernel::{Kernel, KernelConfig};

/// Run a task through the agent kernel.
#[derive(Parser)]
#[command(name = "praxis", version, about = "Autonomous agent execution kernel")]
struct Cli {
    /// Task to execute.
    #[arg(default_value = "Run a system self-check.")]
    task: String,

    /// Model identifier passed to the gateway (empty uses the gateway
    /// default).
    #[arg(long, default_value = "")]
    model: String,

    /// Gateway base URL.
    #[arg(long, default_value = "http://localhost:11434")]
    gateway_url: String,

    /// Mission document path.
    #[arg(long, default_value = "mission.md")]
    mission: PathBuf,

    /// Memory persistence file.
    #[arg(long, default_value = "artifacts/memory/agent_memory.json")]
    memory: PathBuf,

    /// Audit trail directory.
    #[arg(long, default_value = "artifacts/logs")]
    audit_dir: PathBuf,

    /// Server manifest for remote capabilities.
    #[arg(long, default_value = "servers.json")]
    manifest: PathBuf,

    /// Connect remote capability servers at boot.
    #[arg(long)]
    mcp: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let gateway = OllamaGateway::new().base_url(cli.gateway_url);
    let config = KernelConfig {
        model: cli.model,
        mission_path: cli.mission,
        memory_path: cli.memory,
        audit_dir: cli.audit_dir,
        manifest_path: cli.manifest,
        mcp_enabled: cli.mcp,
        ..KernelConfig::default()
    };

    info!(task = %cli.task, "kernel initializing");
    let mut kernel = match Kernel::boot(gateway, config) {
        Ok(kernel) => kernel,
        Err(e) => {
            error!(error = %e, "boot failed");
            return ExitCode::FAILURE;
        }
    };

    let observation = kernel.run(&cli.task);
    println!("{observation}");
    ExitCode::SUCCESS
}
