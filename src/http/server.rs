//! Inbound HTTP surface.
//!
//! # Responsibilities
//! - Create the Axum router with the two gateway routes
//! - Generate the per-call correlation identifier
//! - Dispatch to the forwarding service and translate its result
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - Any call failure collapses to a bare 500; backend error detail
//!   stays in the logs and is never leaked to the inbound caller
//! - The healthcheck does not touch the backend, so it reports listener
//!   liveness only

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::upstream::{ForwardingService, UpstreamRequest};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ForwardingService>,
}

/// HTTP server for the forwarding gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Create a new server around the forwarding service.
    pub fn new(service: Arc<ForwardingService>) -> Self {
        let state = AppState { service };
        let router = Router::new()
            .route("/internal/healthcheck", get(healthcheck))
            .route("/api", post(forward))
            .with_state(state)
            .layer(TraceLayer::new_for_http());
        Self { router }
    }

    /// Serve until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Liveness probe. Always succeeds while the listener is up.
async fn healthcheck() -> &'static str {
    "Healthy"
}

/// Forwarding endpoint: one backend call per inbound request.
async fn forward(State(state): State<AppState>) -> Response {
    let request_id = Uuid::new_v4().to_string();
    tracing::info!(requestid = %request_id, "About to call backend");

    match state.service.call(UpstreamRequest::new(request_id.clone())).await {
        Ok(reply) => {
            tracing::info!(requestid = %request_id, "Got response from backend");
            (StatusCode::OK, Json(reply)).into_response()
        }
        Err(error) => {
            tracing::error!(
                requestid = %request_id,
                error = %error,
                "Backend call failed"
            );
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
