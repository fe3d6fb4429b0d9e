//! Single-hop HTTP forwarding gateway library.

pub mod config;
pub mod dns;
pub mod http;
pub mod lifecycle;
pub mod upstream;

pub use config::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
pub use upstream::ForwardingService;
