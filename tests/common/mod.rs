//! Shared utilities for gateway integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

use forward_gateway::config::TransportConfig;
use forward_gateway::http::GatewayServer;
use forward_gateway::lifecycle::Shutdown;
use forward_gateway::upstream::{build_client, ForwardingService};

/// Start a mock backend that answers every request with a fixed status
/// and body. Returns the address it listens on.
pub async fn start_mock_backend(status_line: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                // Consume the inbound request before answering.
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Start a backend that accepts connections but never responds, for
/// exercising the overall call timeout.
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                tokio::time::sleep(Duration::from_secs(60)).await;
            });
        }
    });

    addr
}

/// Spawn a gateway wired to `backend_url`, listening on an ephemeral
/// port. Returns its address and the shutdown handle.
pub async fn spawn_gateway(backend_url: &str, request_timeout: Duration) -> (SocketAddr, Shutdown) {
    let transport = TransportConfig {
        request_timeout,
        ..TransportConfig::default()
    };
    let client = build_client(&transport, None).unwrap();
    let service = Arc::new(ForwardingService::new(
        Url::parse(backend_url).unwrap(),
        client,
    ));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = GatewayServer::new(service);
    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    (addr, shutdown)
}

/// Client that bypasses any environment proxy settings.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
