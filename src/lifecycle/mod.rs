//! Lifecycle management subsystem.
//!
//! Startup order lives in `main.rs`: config first, then resolver cache
//! and client, then the listener. Shutdown fans out from one broadcast
//! signal to the server and the refresh job.

pub mod shutdown;

pub use shutdown::Shutdown;
