//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (read & parse variables)
//!     → GatewayConfig (validated, immutable)
//!     → shared by value/Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - Every transport knob is required so deployments state their
//!   budgets explicitly; only the listen port and cache settings default
//! - A load failure aborts startup before the listener binds

pub mod loader;
pub mod schema;

pub use loader::ConfigError;
pub use schema::{GatewayConfig, ResolverConfig, TransportConfig, UpstreamConfig};
