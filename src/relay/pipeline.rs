//! Validate → Construct → Execute → Relay.

use axum::body::Bytes;

use crate::relay::error::RelayError;
use crate::relay::spec::CallSpec;
use crate::relay::upstream::{OutboundCall, Upstream};

/// The bytes to hand back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relayed {
    pub body: Bytes,
    /// The upstream body read failed part way; `body` is what arrived first.
    pub truncated: bool,
}

impl Relayed {
    /// Metrics label for a relay that produced a response.
    pub fn outcome(&self) -> &'static str {
        if self.truncated {
            "truncated"
        } else {
            "ok"
        }
    }
}

/// Run one call description through the upstream and return the body to relay.
///
/// The upstream status is logged, never returned: a 404 or 500 upstream
/// still relays its body as a success.
pub async fn forward(upstream: &dyn Upstream, spec: CallSpec) -> Result<Relayed, RelayError> {
    spec.validate()?;
    let call = OutboundCall::from_spec(&spec)?;

    let method = call.method.clone();
    let host = call.host().to_string();

    let response = upstream.perform(call).await.map_err(|e| {
        tracing::warn!(method = %method, host = %host, error = %e, "Upstream call failed");
        RelayError::from(e)
    })?;

    tracing::debug!(
        method = %method,
        host = %host,
        upstream_status = response.status,
        bytes = response.body.len(),
        truncated = response.truncated,
        "Upstream responded"
    );

    Ok(Relayed {
        body: response.body,
        truncated: response.truncated,
    })
}
