//! Outbound call subsystem.
//!
//! # Data Flow
//! ```text
//! UpstreamRequest (correlation ID assigned by the endpoint)
//!     → service.rs (build POST, send, classify)
//!     → transport.rs client (pooling, timeout budgets, cached DNS)
//!     → backend
//!     → UpstreamResponse or CallError
//! ```

pub mod error;
pub mod message;
pub mod service;
pub mod trace;
pub mod transport;

pub use error::CallError;
pub use message::{UpstreamRequest, UpstreamResponse};
pub use service::{ForwardingService, HttpSend};
pub use trace::{CallPhase, CallTrace};
pub use transport::build_client;
