//! The forwarding service: one downstream exchange per call.
//!
//! # Responsibilities
//! - Build the POST to the backend with the serialized request body
//! - Send it through the configured client
//! - Classify the outcome: transport failure, non-200 status, decode
//!   failure, or success
//! - Record the per-call lifecycle trace and log every phase with the
//!   correlation identifier
//!
//! # Design Decisions
//! - The client sits behind the one-method [`HttpSend`] trait so the
//!   classification logic is testable without a live backend
//! - Response bodies are consumed on every path that received one;
//!   an undrained body would pin its connection and defeat pooling
//! - No retries: a failure is surfaced immediately to the caller

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Request, Response, StatusCode};
use tracing::Instrument;
use url::Url;

use crate::upstream::error::{BoxError, CallError};
use crate::upstream::message::{UpstreamRequest, UpstreamResponse};
use crate::upstream::trace::{CallPhase, CallTrace};

/// Longest non-success body fragment kept for diagnosis.
const STATUS_BODY_SNIPPET_CHARS: usize = 512;

/// One operation: issue a request, return the response or an error.
///
/// Satisfied by `reqwest::Client` in production and by in-memory doubles
/// in tests.
#[async_trait]
pub trait HttpSend: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, BoxError>;
}

#[async_trait]
impl HttpSend for reqwest::Client {
    async fn send(&self, request: Request) -> Result<Response, BoxError> {
        self.execute(request).await.map_err(Into::into)
    }
}

/// Sends requests to the configured backend.
pub struct ForwardingService {
    base_url: Url,
    http: Arc<dyn HttpSend>,
}

impl ForwardingService {
    pub fn new(base_url: Url, client: reqwest::Client) -> Self {
        Self::with_sender(base_url, Arc::new(client))
    }

    pub fn with_sender(base_url: Url, http: Arc<dyn HttpSend>) -> Self {
        Self { base_url, http }
    }

    /// Perform exactly one downstream exchange. Reaches one terminal
    /// state: success, transport failure, non-success status, or decode
    /// failure.
    pub async fn call(&self, request: UpstreamRequest) -> Result<UpstreamResponse, CallError> {
        let span = tracing::info_span!("upstream_call", requestid = %request.request_id);
        self.call_inner(request).instrument(span).await
    }

    async fn call_inner(&self, request: UpstreamRequest) -> Result<UpstreamResponse, CallError> {
        let mut trace = CallTrace::start();

        let body = serde_json::to_vec(&request).map_err(CallError::Encode)?;
        let mut outbound = Request::new(Method::POST, self.base_url.clone());
        outbound
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *outbound.body_mut() = Some(body.into());
        trace.record(CallPhase::RequestBuilt);

        tracing::debug!("Sending request to backend");
        trace.record(CallPhase::SendStart);
        let response = match self.http.send(outbound).await {
            Ok(response) => response,
            Err(source) => {
                tracing::error!(
                    trace = %trace,
                    error = %source,
                    "Request to backend failed"
                );
                return Err(CallError::Transport(source));
            }
        };
        trace.record(CallPhase::HeadersReceived);

        let status = response.status();
        if status != StatusCode::OK {
            // Drain so the connection can go back to the pool.
            let drained = response.text().await.unwrap_or_default();
            trace.record(CallPhase::BodyDrained);
            let body = snippet(&drained);
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                trace = %trace,
                "Backend returned non-success status"
            );
            return Err(CallError::BackendStatus { status, body });
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(source) => {
                tracing::error!(
                    trace = %trace,
                    error = %source,
                    "Connection failed while reading backend response"
                );
                return Err(CallError::Transport(source.into()));
            }
        };
        trace.record(CallPhase::BodyRead);

        let mut reply: UpstreamResponse = serde_json::from_slice(&bytes).map_err(|source| {
            tracing::error!(trace = %trace, error = %source, "Failed to decode backend response");
            CallError::Decode(source)
        })?;
        reply.request_id = request.request_id;

        tracing::debug!(trace = %trace, "Backend call complete");
        Ok(reply)
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(STATUS_BODY_SNIPPET_CHARS).collect()
}
