//! Hostname resolution cache.
//!
//! # Responsibilities
//! - Serve cached hostname → IP mappings to the outbound connector
//! - Resolve and cache on first sight of a hostname
//! - Let the refresh job replace entries without blocking lookups
//!
//! # Design Decisions
//! - A stale address beats no address: refresh failures never evict
//! - Resolution goes through the `HostResolver` trait so tests can
//!   substitute a counting or failing resolver

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

/// Error type for hostname resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The system resolver failed for this hostname.
    #[error("failed to resolve {host}: {source}")]
    Lookup {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// Resolution succeeded but produced no addresses.
    #[error("no addresses found for {0}")]
    NoAddresses(String),
}

/// One operation: turn a hostname into an IP address.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve_host(&self, host: &str) -> Result<IpAddr, ResolveError>;
}

/// Production resolver backed by the operating system.
pub struct SystemResolver;

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve_host(&self, host: &str) -> Result<IpAddr, ResolveError> {
        let mut addrs = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|source| ResolveError::Lookup {
                host: host.to_string(),
                source,
            })?;
        addrs
            .next()
            .map(|addr| addr.ip())
            .ok_or_else(|| ResolveError::NoAddresses(host.to_string()))
    }
}

struct CacheEntry {
    addr: IpAddr,
    refreshed_at: Instant,
}

/// Background-refreshed hostname → IP cache.
///
/// Lookups from the request path only read the map; the refresh job is
/// the sole writer for existing entries.
pub struct ResolverCache {
    entries: DashMap<String, CacheEntry>,
    resolver: Arc<dyn HostResolver>,
}

impl ResolverCache {
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(SystemResolver))
    }

    pub fn with_resolver(resolver: Arc<dyn HostResolver>) -> Self {
        Self {
            entries: DashMap::new(),
            resolver,
        }
    }

    /// Return the cached address for `host`, resolving and caching it on
    /// a miss. Fails only when nothing is cached and resolution fails.
    pub async fn lookup(&self, host: &str) -> Result<IpAddr, ResolveError> {
        if let Some(entry) = self.entries.get(host) {
            return Ok(entry.addr);
        }

        let addr = self.resolver.resolve_host(host).await?;
        self.entries.insert(
            host.to_string(),
            CacheEntry {
                addr,
                refreshed_at: Instant::now(),
            },
        );
        tracing::debug!(host = %host, addr = %addr, "Cached new DNS entry");
        Ok(addr)
    }

    /// Re-resolve every cached hostname, replacing entries that resolve
    /// and keeping the stale address for those that do not.
    pub async fn refresh_all(&self) -> RefreshOutcome {
        let hosts: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        let mut outcome = RefreshOutcome::default();

        for host in hosts {
            match self.resolver.resolve_host(&host).await {
                Ok(addr) => {
                    let previous = self.entries.insert(
                        host.clone(),
                        CacheEntry {
                            addr,
                            refreshed_at: Instant::now(),
                        },
                    );
                    if let Some(previous) = previous {
                        if previous.addr != addr {
                            tracing::info!(
                                host = %host,
                                old = %previous.addr,
                                new = %addr,
                                entry_age_ms = previous.refreshed_at.elapsed().as_millis() as u64,
                                "DNS entry changed on refresh"
                            );
                        }
                    }
                    outcome.refreshed += 1;
                }
                Err(error) => {
                    tracing::warn!(
                        host = %host,
                        error = %error,
                        "DNS refresh failed, keeping cached address"
                    );
                    outcome.failed += 1;
                }
            }
        }

        outcome
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResolverCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts from one refresh cycle, for logging.
#[derive(Debug, Default, Clone, Copy)]
pub struct RefreshOutcome {
    pub refreshed: usize,
    pub failed: usize,
}
