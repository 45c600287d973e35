//! Relay error taxonomy and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Terminal failure of one relay invocation.
///
/// Every variant short-circuits the pipeline; nothing is retried.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Inbound method was not POST.
    #[error("only POST allowed")]
    MethodNotAllowed,

    /// Inbound body did not decode as a call description.
    #[error("invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    /// Method or url was empty.
    #[error("method and url are required")]
    MissingFields,

    /// The outbound call could not be built from the description.
    #[error("{0}")]
    Construct(String),

    /// The outbound call failed or timed out.
    #[error("{0}")]
    BadGateway(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::InvalidJson(_) | RelayError::MissingFields | RelayError::Construct(_) => {
                StatusCode::BAD_REQUEST
            }
            RelayError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Label used for metrics and logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::MethodNotAllowed => "method_not_allowed",
            RelayError::InvalidJson(_) => "invalid_json",
            RelayError::MissingFields => "missing_fields",
            RelayError::Construct(_) => "construct_failed",
            RelayError::BadGateway(_) => "bad_gateway",
        }
    }
}

/// Wire shape of every relay error: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
