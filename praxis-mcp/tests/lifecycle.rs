//! Connection manager lifecycle against unreachable and disabled servers.
//!
//! No live MCP server is required: the interesting contracts are exactly
//! the ones that hold when connections cannot be established.

use std::io::Write;
use std::path::PathBuf;

use praxis_mcp::{ConnectionManager, SyncConnectionManager};

fn write_manifest(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("servers.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    (dir, path)
}

#[tokio::test]
async fn disabled_server_is_absent_and_unreachable_server_is_isolated() {
    let (_dir, path) = write_manifest(
        r#"{ "servers": [
            { "name": "off", "command": "anything", "enabled": false },
            { "name": "ghost", "command": "/nonexistent/praxis-test-binary" }
        ] }"#,
    );

    let manager = ConnectionManager::new(&path);
    manager.initialize().await;

    let status = manager.status().await;
    assert_eq!(status.len(), 1, "disabled server must not enter the table");
    assert_eq!(status[0].server, "ghost");
    assert!(!status[0].connected);
    assert!(status[0].error.as_deref().is_some_and(|e| !e.is_empty()));
    assert_eq!(status[0].capabilities, 0);
}

#[tokio::test]
async fn unknown_transport_fails_only_that_server() {
    let (_dir, path) = write_manifest(
        r#"{ "servers": [
            { "name": "odd", "transport": "carrier-pigeon" },
            { "name": "ghost", "command": "/nonexistent/praxis-test-binary" }
        ] }"#,
    );

    let manager = ConnectionManager::new(&path);
    manager.initialize().await;

    let status = manager.status().await;
    assert_eq!(status.len(), 2);
    assert!(!status[0].connected);
    assert!(
        status[0]
            .error
            .as_deref()
            .is_some_and(|e| e.contains("unrecognized transport"))
    );
    assert!(!status[1].connected);
}

#[tokio::test]
async fn stdio_without_command_is_a_configuration_error() {
    let (_dir, path) = write_manifest(r#"{ "servers": [ { "name": "bare" } ] }"#);

    let manager = ConnectionManager::new(&path);
    manager.initialize().await;

    let status = manager.status().await;
    assert_eq!(status.len(), 1);
    assert!(!status[0].connected);
    assert!(
        status[0]
            .error
            .as_deref()
            .is_some_and(|e| e.contains("no command"))
    );
}

#[tokio::test]
async fn initialize_is_idempotent() {
    let (_dir, path) = write_manifest(
        r#"{ "servers": [ { "name": "ghost", "command": "/nonexistent/praxis-test-binary" } ] }"#,
    );

    let manager = ConnectionManager::new(&path);
    manager.initialize().await;
    manager.initialize().await;

    assert_eq!(manager.status().await.len(), 1);
}

#[tokio::test]
async fn shutdown_clears_the_table_and_permits_reconnect() {
    let (_dir, path) = write_manifest(
        r#"{ "servers": [ { "name": "ghost", "command": "/nonexistent/praxis-test-binary" } ] }"#,
    );

    let manager = ConnectionManager::new(&path);
    manager.initialize().await;
    assert_eq!(manager.status().await.len(), 1);

    manager.shutdown().await;
    assert!(manager.status().await.is_empty());

    // The initialized flag was reset, so a new cycle reconnects.
    manager.initialize().await;
    assert_eq!(manager.status().await.len(), 1);
}

#[tokio::test]
async fn missing_manifest_initializes_with_zero_servers() {
    let dir = tempfile::tempdir().unwrap();
    let manager = ConnectionManager::new(dir.path().join("absent.json"));
    manager.initialize().await;
    assert!(manager.status().await.is_empty());
}

#[test]
fn sync_wrapper_drives_the_same_lifecycle_from_blocking_code() {
    let (_dir, path) = write_manifest(
        r#"{ "servers": [
            { "name": "off", "command": "anything", "enabled": false },
            { "name": "ghost", "command": "/nonexistent/praxis-test-binary" }
        ] }"#,
    );

    let manager = SyncConnectionManager::new(ConnectionManager::new(&path));
    manager.initialize();

    let status = manager.status();
    assert_eq!(status.len(), 1);
    assert!(!status[0].connected);

    assert!(manager.capability_proxies("mcp_").is_empty());

    manager.shutdown();
    assert!(manager.status().is_empty());
}
