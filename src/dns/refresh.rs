//! Background refresh of cached DNS entries.
//!
//! # Responsibilities
//! - Periodically re-resolve every hostname in the cache
//! - Keep refresh traffic decoupled from request traffic

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::dns::cache::ResolverCache;

/// Long-lived task that keeps the resolver cache warm.
pub struct RefreshJob {
    cache: Arc<ResolverCache>,
    interval: Duration,
}

impl RefreshJob {
    pub fn new(cache: Arc<ResolverCache>, interval: Duration) -> Self {
        Self { cache, interval }
    }

    /// Run until the shutdown signal fires. Refresh failures are logged
    /// inside the cache and never stop the loop.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            "DNS refresh job starting"
        );

        let mut ticker = time::interval(self.interval);
        // The first tick completes immediately; skip it so a fresh cache
        // is not refreshed before anything is in it.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let outcome = self.cache.refresh_all().await;
                    if outcome.refreshed > 0 || outcome.failed > 0 {
                        tracing::debug!(
                            refreshed = outcome.refreshed,
                            failed = outcome.failed,
                            cached = self.cache.len(),
                            "DNS refresh cycle completed"
                        );
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("DNS refresh job received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::cache::{HostResolver, ResolveError};
    use async_trait::async_trait;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingResolver(AtomicUsize);

    #[async_trait]
    impl HostResolver for CountingResolver {
        async fn resolve_host(&self, _host: &str) -> Result<IpAddr, ResolveError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Ipv4Addr::new(10, 0, 0, 9).into())
        }
    }

    #[tokio::test]
    async fn job_refreshes_until_shutdown() {
        let resolver = Arc::new(CountingResolver(AtomicUsize::new(0)));
        let cache = Arc::new(ResolverCache::with_resolver(resolver.clone()));
        cache.lookup("backend.internal").await.unwrap();

        let (tx, rx) = broadcast::channel(1);
        let job = RefreshJob::new(cache, Duration::from_millis(20));
        let handle = tokio::spawn(job.run(rx));

        tokio::time::sleep(Duration::from_millis(90)).await;
        tx.send(()).unwrap();
        handle.await.unwrap();

        // Initial lookup plus at least one background cycle.
        assert!(resolver.0.load(Ordering::SeqCst) >= 2);
    }
}
