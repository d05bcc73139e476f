//! Per-node connection lifecycle and capability discovery.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rmcp::ServiceExt;
use rmcp::model::Tool as McpTool;
use rmcp::service::{Peer, RoleClient, RunningService};
use rmcp::transport::child_process::TokioChildProcess;
use tokio::sync::Mutex;
use tracing::{info, warn};

use praxis_types::McpError;

use crate::bridge::SyncBridge;
use crate::config::{ServerDescriptor, TransportKind, load_manifest};
use crate::proxy::RemoteProxy;
use crate::types::{RemoteCapability, proxy_key};

/// State for one configured server link.
///
/// Created during initialize and destroyed at shutdown; a connection never
/// outlives one initialize/shutdown cycle.
pub struct ServerConnection {
    /// The descriptor this connection was built from.
    pub descriptor: ServerDescriptor,
    /// Capabilities discovered after a successful handshake.
    pub capabilities: Vec<RemoteCapability>,
    /// Why the connection is down, when it is.
    pub error: Option<String>,
    connected: Arc<AtomicBool>,
    peer: Option<Peer<RoleClient>>,
    service: Option<RunningService<RoleClient, ()>>,
}

impl ServerConnection {
    fn failed(descriptor: ServerDescriptor, error: &McpError) -> Self {
        Self {
            descriptor,
            capabilities: Vec::new(),
            error: Some(error.to_string()),
            connected: Arc::new(AtomicBool::new(false)),
            peer: None,
            service: None,
        }
    }

    /// Whether the link is currently up.
    #[must_use]
    pub fn connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

/// A point-in-time view of one connection's health.
#[derive(Debug, Clone)]
pub struct ConnectionStatus {
    /// The server's manifest name.
    pub server: String,
    /// Whether the link was up at snapshot time.
    pub connected: bool,
    /// Failure detail, when down.
    pub error: Option<String>,
    /// Number of discovered capabilities.
    pub capabilities: usize,
}

struct ManagerState {
    initialized: bool,
    connections: Vec<ServerConnection>,
}

/// Manages connections to every configured capability server.
///
/// Servers are connected sequentially, in manifest order, so the
/// connection log reads serially; one server's failure is isolated into
/// its own entry and never aborts the rest.
pub struct ConnectionManager {
    manifest_path: PathBuf,
    state: Mutex<ManagerState>,
}

impl ConnectionManager {
    /// Create a manager reading its descriptors from `manifest_path`.
    #[must_use]
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            state: Mutex::new(ManagerState {
                initialized: false,
                connections: Vec::new(),
            }),
        }
    }

    /// Connect every enabled server.
    ///
    /// Idempotent: a repeated or concurrent call while already initialized
    /// is a no-op (the async lock also serializes racing callers).
    pub async fn initialize(&self) {
        let mut state = self.state.lock().await;
        if state.initialized {
            return;
        }

        let descriptors = load_manifest(&self.manifest_path);
        if descriptors.is_empty() {
            info!("no capability servers configured");
            state.initialized = true;
            return;
        }

        for descriptor in descriptors {
            let connection = connect_server(descriptor).await;
            state.connections.push(connection);
        }

        let up = state.connections.iter().filter(|c| c.connected()).count();
        let capabilities: usize = state.connections.iter().map(|c| c.capabilities.len()).sum();
        info!(
            connected = up,
            configured = state.connections.len(),
            capabilities,
            "capability servers initialized"
        );
        state.initialized = true;
    }

    /// Snapshot of the connection table.
    pub async fn status(&self) -> Vec<ConnectionStatus> {
        let state = self.state.lock().await;
        state
            .connections
            .iter()
            .map(|connection| ConnectionStatus {
                server: connection.descriptor.name.clone(),
                connected: connection.connected(),
                error: connection.error.clone(),
                capabilities: connection.capabilities.len(),
            })
            .collect()
    }

    /// One registry-ready proxy per discovered capability across all
    /// connected servers, keyed `<prefix><server>_<name>`.
    pub async fn capability_proxies(
        &self,
        prefix: &str,
        bridge: &Arc<SyncBridge>,
    ) -> Vec<RemoteProxy> {
        let state = self.state.lock().await;
        let mut proxies = Vec::new();
        for connection in &state.connections {
            let Some(peer) = &connection.peer else {
                continue;
            };
            for capability in &connection.capabilities {
                proxies.push(RemoteProxy::new(
                    proxy_key(prefix, &capability.server, &capability.name),
                    capability.clone(),
                    peer.clone(),
                    Arc::clone(&connection.connected),
                    Arc::clone(bridge),
                ));
            }
        }
        proxies
    }

    /// Tear down every connection.
    ///
    /// Each close is independently fault-isolated, so one stuck session
    /// never blocks the others. Clears the connection table and resets the
    /// initialized flag so a later `initialize` may reconnect.
    pub async fn shutdown(&self) {
        let mut state = self.state.lock().await;
        for mut connection in state.connections.drain(..) {
            connection.connected.store(false, Ordering::SeqCst);
            if let Some(service) = connection.service.take()
                && let Err(e) = service.cancel().await
            {
                warn!(server = %connection.descriptor.name, error = %e, "session close failed");
            }
        }
        state.initialized = false;
        info!("capability servers released");
    }
}

/// Establish one server link and discover its capabilities.
async fn connect_server(descriptor: ServerDescriptor) -> ServerConnection {
    info!(server = %descriptor.name, transport = %descriptor.transport, "connecting capability server");

    let service = match establish(&descriptor).await {
        Ok(service) => service,
        Err(e) => {
            warn!(server = %descriptor.name, error = %e, "connection failed");
            return ServerConnection::failed(descriptor, &e);
        }
    };

    let capabilities = match service.list_all_tools().await {
        Ok(tools) => tools
            .into_iter()
            .map(|tool| remote_capability(&descriptor.name, tool))
            .collect(),
        Err(e) => {
            // The link stays up; it just advertises nothing.
            warn!(server = %descriptor.name, error = %e, "capability discovery failed");
            Vec::new()
        }
    };

    info!(
        server = %descriptor.name,
        capabilities = capabilities.len(),
        "capability server connected"
    );
    ServerConnection {
        peer: Some(service.peer().clone()),
        connected: Arc::new(AtomicBool::new(true)),
        service: Some(service),
        capabilities,
        error: None,
        descriptor,
    }
}

async fn establish(
    descriptor: &ServerDescriptor,
) -> Result<RunningService<RoleClient, ()>, McpError> {
    match descriptor.transport {
        TransportKind::Stdio => connect_stdio(descriptor).await,
        TransportKind::Http | TransportKind::Sse => connect_http(descriptor).await,
        TransportKind::Unknown => Err(McpError::Config(format!(
            "unrecognized transport for server '{}'",
            descriptor.name
        ))),
    }
}

async fn connect_stdio(
    descriptor: &ServerDescriptor,
) -> Result<RunningService<RoleClient, ()>, McpError> {
    let command_name = descriptor.command.as_deref().ok_or_else(|| {
        McpError::Config(format!(
            "server '{}' uses the stdio transport but has no command",
            descriptor.name
        ))
    })?;

    let mut command = tokio::process::Command::new(command_name);
    command.args(&descriptor.args).envs(&descriptor.env);

    let transport =
        TokioChildProcess::new(command).map_err(|e| McpError::Connection(e.to_string()))?;
    ()
        .serve(transport)
        .await
        .map_err(|e| McpError::Connection(e.to_string()))
}

#[cfg(feature = "http")]
async fn connect_http(
    descriptor: &ServerDescriptor,
) -> Result<RunningService<RoleClient, ()>, McpError> {
    use rmcp::transport::streamable_http_client::StreamableHttpClientTransport;

    let url = descriptor.url.as_deref().ok_or_else(|| {
        McpError::Config(format!(
            "server '{}' uses the {} transport but has no url",
            descriptor.name, descriptor.transport
        ))
    })?;

    let transport = StreamableHttpClientTransport::from_uri(url);
    ()
        .serve(transport)
        .await
        .map_err(|e| McpError::Connection(e.to_string()))
}

#[cfg(not(feature = "http"))]
async fn connect_http(
    descriptor: &ServerDescriptor,
) -> Result<RunningService<RoleClient, ()>, McpError> {
    Err(McpError::MissingDependency(format!(
        "server '{}' needs the {} transport; rebuild with the `http` feature",
        descriptor.name, descriptor.transport
    )))
}

fn remote_capability(server: &str, tool: McpTool) -> RemoteCapability {
    RemoteCapability {
        name: tool.name.to_string(),
        description: tool
            .description
            .as_deref()
            .unwrap_or("No description provided.")
            .to_string(),
        input_schema: serde_json::to_value(&*tool.input_schema)
            .unwrap_or_else(|_| serde_json::json!({ "type": "object" })),
        server: server.to_string(),
    }
}
