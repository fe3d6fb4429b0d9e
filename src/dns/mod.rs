//! DNS caching subsystem.
//!
//! # Data Flow
//! ```text
//! outbound connector needs an address
//!     → resolve.rs (reqwest Resolve adapter)
//!     → cache.rs (DashMap lookup; resolve-and-insert on miss)
//!
//! every refresh interval:
//!     refresh.rs → cache.rs re-resolves all cached hostnames
//! ```
//!
//! The whole subsystem is optional: with the cache disabled the client
//! keeps its default resolver and only tail latency changes.

pub mod cache;
pub mod refresh;
pub mod resolve;

pub use cache::{HostResolver, ResolveError, ResolverCache, SystemResolver};
pub use refresh::RefreshJob;
pub use resolve::CachedResolve;
