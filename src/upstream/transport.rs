//! Outbound client construction.
//!
//! # Responsibilities
//! - Build the one pooled client shared by every call
//! - Apply the independent timeout budgets from [`TransportConfig`]
//! - Wire the resolver cache into the connector when enabled
//!
//! # Design Decisions
//! - TCP connect and TLS handshake run as a single connector phase in
//!   this stack, so their two budgets compose into one connect timeout
//! - The overall request timeout lives on the client, bounding the full
//!   round trip regardless of which phase is slow

use std::sync::Arc;

use crate::config::TransportConfig;
use crate::dns::{CachedResolve, ResolverCache};

/// Build the pooled outbound client. Called once at startup; the client
/// is cloned cheaply (it is internally reference-counted) wherever it is
/// needed.
pub fn build_client(
    config: &TransportConfig,
    cache: Option<Arc<ResolverCache>>,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .pool_max_idle_per_host(config.max_idle_per_host)
        .pool_idle_timeout(config.idle_timeout)
        .connect_timeout(config.dial_timeout + config.tls_handshake_timeout)
        .tcp_keepalive(config.keepalive)
        .timeout(config.request_timeout);

    if let Some(cache) = cache {
        builder = builder.dns_resolver(Arc::new(CachedResolve::new(cache)));
    }

    builder.build()
}
