//! Resolver cache adapter for the outbound client.
//!
//! The stock connector resolves through the system resolver on every new
//! connection; this adapter routes those lookups through the shared
//! [`ResolverCache`] instead. DNS timing events land in the per-call
//! tracing span because the connect future is polled inside it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use reqwest::dns::{Addrs, Name, Resolve, Resolving};

use crate::dns::cache::{ResolveError, ResolverCache};

/// `reqwest::dns::Resolve` implementation backed by the cache.
pub struct CachedResolve {
    cache: Arc<ResolverCache>,
}

impl CachedResolve {
    pub fn new(cache: Arc<ResolverCache>) -> Self {
        Self { cache }
    }
}

impl Resolve for CachedResolve {
    fn resolve(&self, name: Name) -> Resolving {
        let cache = Arc::clone(&self.cache);
        Box::pin(async move {
            let addr = lookup_traced(&cache, name.as_str()).await?;
            // The connector fills in the request's port.
            let addrs: Addrs = Box::new(std::iter::once(SocketAddr::new(addr, 0)));
            Ok(addrs)
        })
    }
}

async fn lookup_traced(
    cache: &ResolverCache,
    host: &str,
) -> Result<std::net::IpAddr, ResolveError> {
    tracing::debug!(host = %host, "DNS lookup start");
    let started = Instant::now();

    let result = cache.lookup(host).await;

    match &result {
        Ok(addr) => tracing::debug!(
            host = %host,
            addr = %addr,
            elapsed_us = started.elapsed().as_micros() as u64,
            "DNS lookup done"
        ),
        Err(error) => tracing::debug!(host = %host, error = %error, "DNS lookup failed"),
    }
    result
}
