//! Inbound HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (route: healthcheck | forward)
//!     → correlation ID generated (UUID v4)
//!     → upstream::ForwardingService::call
//!     → 200 + JSON reply, or bare 500 on any call failure
//! ```

pub mod server;

pub use server::{AppState, GatewayServer};
