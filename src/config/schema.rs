//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. Values are loaded from the environment by `loader.rs`; the
//! structs here only describe shape and defaults.

use std::time::Duration;
use url::Url;

/// Default listen port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8000;

/// Root configuration for the forwarding gateway.
///
/// Built once at startup and shared read-only across all handlers.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Port the inbound HTTP listener binds to.
    pub port: u16,

    /// Backend the gateway forwards to.
    pub upstream: UpstreamConfig,

    /// Connection pool and timeout settings for the outbound client.
    pub transport: TransportConfig,

    /// Resolver cache settings.
    pub resolver: ResolverConfig,
}

/// Backend target configuration.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL every forwarded request is POSTed to.
    pub base_url: Url,
}

/// Outbound client tuning.
///
/// Each timeout bounds a different phase of the exchange so a slow dial,
/// a slow handshake, and a slow backend stay distinguishable in
/// diagnostics.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Idle connections retained per backend host.
    pub max_idle_per_host: usize,

    /// Budget for establishing a new TCP connection.
    pub dial_timeout: Duration,

    /// TCP keep-alive probe interval for pooled connections.
    pub keepalive: Duration,

    /// How long an unused pooled connection is retained before eviction.
    pub idle_timeout: Duration,

    /// Budget for the TLS handshake on new connections.
    pub tls_handshake_timeout: Duration,

    /// Overall per-call budget covering the entire round trip.
    pub request_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 16,
            dial_timeout: Duration::from_secs(5),
            keepalive: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(60),
            tls_handshake_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Resolver cache settings.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// When false, the outbound client resolves through the system
    /// resolver on every new connection.
    pub enabled: bool,

    /// How often the background job re-resolves cached hostnames.
    pub refresh_interval: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            refresh_interval: Duration::from_secs(60),
        }
    }
}
