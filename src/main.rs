//! Single-Hop HTTP Forwarding Gateway
//!
//! Accepts an inbound HTTP request, synthesizes a correlation-tagged
//! JSON request, issues it to one configured backend over a tuned,
//! connection-reusing client, and relays the decoded reply.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │              FORWARDING GATEWAY                 │
//!                    │                                                 │
//!   Client Request   │  ┌─────────┐   ┌────────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│  upstream  │──▶│ transport │──┼──▶ Backend
//!                    │  │ server  │   │  service   │   │  client   │  │
//!   Client Response  │  └─────────┘   └────────────┘   └─────┬─────┘  │
//!   ◀────────────────┼───────(200 JSON │ bare 500)           │        │
//!                    │                                       ▼        │
//!                    │  ┌────────────────────────────────────────┐    │
//!                    │  │                  dns                    │    │
//!                    │  │  cache ◀── refresh job (background)     │    │
//!                    │  └────────────────────────────────────────┘    │
//!                    │                                                 │
//!                    │  config (env) · lifecycle (shutdown) · tracing  │
//!                    └────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod dns;
pub mod http;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::GatewayConfig;
use crate::dns::{RefreshJob, ResolverCache};
use crate::http::GatewayServer;
use crate::lifecycle::Shutdown;
use crate::upstream::{build_client, ForwardingService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    tracing::info!("forward-gateway v0.1.0 starting");

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(error = %error, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = config.port,
        backend = %config.upstream.base_url,
        dns_cache = config.resolver.enabled,
        request_timeout_ms = config.transport.request_timeout.as_millis() as u64,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let cache = if config.resolver.enabled {
        let cache = Arc::new(ResolverCache::new());
        let job = RefreshJob::new(Arc::clone(&cache), config.resolver.refresh_interval);
        let receiver = shutdown.subscribe();
        tokio::spawn(async move {
            job.run(receiver).await;
        });
        Some(cache)
    } else {
        None
    };

    let client = build_client(&config.transport, cache)?;
    let service = Arc::new(ForwardingService::new(
        config.upstream.base_url.clone(),
        client,
    ));

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = GatewayServer::new(service);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber. `LOG_FORMAT=json` switches to the
/// machine-readable format for production log pipelines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "forward_gateway=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
