//! Request and response shapes for the backend exchange.

use serde::{Deserialize, Serialize};

/// Body of the downstream POST. Carries only the correlation identifier;
/// the backend echoes it in its logs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpstreamRequest {
    /// Correlation identifier, omitted from the wire when empty.
    #[serde(rename = "requestid", default, skip_serializing_if = "String::is_empty")]
    pub request_id: String,
}

impl UpstreamRequest {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}

/// Decoded backend reply, returned to the inbound caller as JSON.
///
/// The correlation identifier is attached by the gateway after decoding;
/// a value present on the wire is ignored so traceability never depends
/// on the backend echoing it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpstreamResponse {
    /// Backend payload field.
    pub qux: String,

    #[serde(rename = "requestid", default, skip_deserializing)]
    pub request_id: String,
}
