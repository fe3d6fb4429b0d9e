//! Configuration loading from the environment.
//!
//! # Responsibilities
//! - Read every gateway setting from environment variables
//! - Parse and validate values (ports, durations, URLs)
//! - Fail loudly at startup: a missing or malformed variable aborts
//!   before the listener binds

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::schema::{
    GatewayConfig, ResolverConfig, TransportConfig, UpstreamConfig, DEFAULT_PORT,
};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable was set but could not be parsed.
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },

    /// The backend base URL did not parse.
    #[error("invalid SERVICE_BASE_URL: {0}")]
    BaseUrl(#[source] url::ParseError),
}

impl GatewayConfig {
    /// Load the full configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source. Tests inject a map here
    /// instead of mutating the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => parse("PORT", raw)?,
            None => DEFAULT_PORT,
        };

        let base_url = lookup("SERVICE_BASE_URL")
            .ok_or(ConfigError::Missing("SERVICE_BASE_URL"))?;
        let base_url = Url::parse(&base_url).map_err(ConfigError::BaseUrl)?;

        let transport = TransportConfig {
            max_idle_per_host: required(&lookup, "HTTP_CLIENT_MAX_IDLE_CONNS_PER_HOST")?,
            dial_timeout: required_ms(&lookup, "HTTP_CLIENT_DIALER_TIMEOUT_MS")?,
            keepalive: required_ms(&lookup, "HTTP_CLIENT_DIALER_KEEPALIVE_MS")?,
            idle_timeout: required_ms(&lookup, "HTTP_CLIENT_IDLE_CONN_TIMEOUT_MS")?,
            tls_handshake_timeout: required_ms(&lookup, "HTTP_CLIENT_TLS_HANDSHAKE_TIMEOUT_MS")?,
            request_timeout: required_ms(&lookup, "HTTP_CLIENT_TIMEOUT_MS")?,
        };

        let defaults = ResolverConfig::default();
        let resolver = ResolverConfig {
            enabled: match lookup("DNS_CACHE_ENABLED") {
                Some(raw) => parse("DNS_CACHE_ENABLED", raw)?,
                None => defaults.enabled,
            },
            refresh_interval: match lookup("DNS_CACHE_REFRESH_INTERVAL_MS") {
                Some(raw) => Duration::from_millis(parse("DNS_CACHE_REFRESH_INTERVAL_MS", raw)?),
                None => defaults.refresh_interval,
            },
        };

        Ok(Self {
            port,
            upstream: UpstreamConfig { base_url },
            transport,
            resolver,
        })
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value: raw })
}

fn required<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<T, ConfigError> {
    let raw = lookup(name).ok_or(ConfigError::Missing(name))?;
    parse(name, raw)
}

fn required_ms(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Duration, ConfigError> {
    Ok(Duration::from_millis(required(lookup, name)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("SERVICE_BASE_URL", "http://backend.internal:9000/api"),
            ("HTTP_CLIENT_MAX_IDLE_CONNS_PER_HOST", "8"),
            ("HTTP_CLIENT_DIALER_TIMEOUT_MS", "2000"),
            ("HTTP_CLIENT_DIALER_KEEPALIVE_MS", "15000"),
            ("HTTP_CLIENT_IDLE_CONN_TIMEOUT_MS", "90000"),
            ("HTTP_CLIENT_TLS_HANDSHAKE_TIMEOUT_MS", "3000"),
            ("HTTP_CLIENT_TIMEOUT_MS", "5000"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<GatewayConfig, ConfigError> {
        GatewayConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn loads_full_config() {
        let config = load(&full_env()).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.upstream.base_url.as_str(), "http://backend.internal:9000/api");
        assert_eq!(config.transport.max_idle_per_host, 8);
        assert_eq!(config.transport.dial_timeout, Duration::from_secs(2));
        assert_eq!(config.transport.request_timeout, Duration::from_secs(5));
        assert!(config.resolver.enabled);
        assert_eq!(config.resolver.refresh_interval, Duration::from_secs(60));
    }

    #[test]
    fn port_and_resolver_overrides() {
        let mut env = full_env();
        env.insert("PORT", "8443");
        env.insert("DNS_CACHE_ENABLED", "false");
        env.insert("DNS_CACHE_REFRESH_INTERVAL_MS", "1000");

        let config = load(&env).unwrap();
        assert_eq!(config.port, 8443);
        assert!(!config.resolver.enabled);
        assert_eq!(config.resolver.refresh_interval, Duration::from_secs(1));
    }

    #[test]
    fn missing_base_url_is_fatal() {
        let mut env = full_env();
        env.remove("SERVICE_BASE_URL");
        assert!(matches!(
            load(&env),
            Err(ConfigError::Missing("SERVICE_BASE_URL"))
        ));
    }

    #[test]
    fn malformed_timeout_is_rejected() {
        let mut env = full_env();
        env.insert("HTTP_CLIENT_TIMEOUT_MS", "fast");
        assert!(matches!(
            load(&env),
            Err(ConfigError::Invalid { name: "HTTP_CLIENT_TIMEOUT_MS", .. })
        ));
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let mut env = full_env();
        env.insert("SERVICE_BASE_URL", "not a url");
        assert!(matches!(load(&env), Err(ConfigError::BaseUrl(_))));
    }
}
