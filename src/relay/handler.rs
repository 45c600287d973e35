//! The `/api` endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::observability::metrics;
use crate::relay::error::RelayError;
use crate::relay::pipeline::{forward, Relayed};
use crate::relay::spec::CallSpec;
use crate::relay::upstream::Upstream;

/// Upstream capability shared by all handler invocations.
pub type SharedUpstream = Arc<dyn Upstream>;

/// Accept → Decode → forward. Responds with the upstream bytes or a JSON error.
pub async fn relay_handler(State(upstream): State<SharedUpstream>, request: Request) -> Response {
    let start = Instant::now();

    match relay(upstream.as_ref(), request).await {
        Ok(relayed) => {
            metrics::record_relay(relayed.outcome(), start);
            let headers = [(header::CONTENT_TYPE, "application/json")];
            (StatusCode::OK, headers, relayed.body).into_response()
        }
        Err(err) => {
            let outcome = err.outcome();
            if err.status().is_server_error() {
                tracing::warn!(outcome, error = %err, "Relay failed");
            } else {
                tracing::debug!(outcome, error = %err, "Relay rejected");
            }
            metrics::record_relay(outcome, start);
            err.into_response()
        }
    }
}

async fn relay(upstream: &dyn Upstream, request: Request) -> Result<Relayed, RelayError> {
    if request.method() != Method::POST {
        return Err(RelayError::MethodNotAllowed);
    }

    let raw = read_body(request.into_body()).await?;
    let spec = CallSpec::decode(&raw)?;

    tracing::info!(method = %spec.method, url = %spec.url, "Relaying call");
    forward(upstream, spec).await
}

/// Read the whole inbound body. A broken body is reported like malformed JSON.
async fn read_body(body: Body) -> Result<Bytes, RelayError> {
    axum::body::to_bytes(body, usize::MAX).await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to read inbound body");
        RelayError::InvalidJson(<serde_json::Error as serde::de::Error>::custom(e))
    })
}
