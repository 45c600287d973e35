//! The decoded description of one outbound call.

use serde::{Deserialize, Serialize};

use crate::relay::error::RelayError;

/// What the caller wants relayed: `{"method", "url", "body"?}`.
///
/// Lives for a single inbound request. Missing fields decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CallSpec {
    pub method: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl CallSpec {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Decode an inbound request body.
    ///
    /// Only the first JSON value is read; anything after it is ignored. A
    /// top-level `null` decodes as an empty spec and fails validation later.
    pub fn decode(raw: &[u8]) -> Result<Self, RelayError> {
        let mut values =
            serde_json::Deserializer::from_slice(raw).into_iter::<Option<CallSpec>>();
        match values.next() {
            Some(Ok(spec)) => Ok(spec.unwrap_or_default()),
            Some(Err(e)) => Err(RelayError::InvalidJson(e)),
            None => Err(RelayError::InvalidJson(
                <serde_json::Error as serde::de::Error>::custom("empty request body"),
            )),
        }
    }

    /// Both method and url must be non-empty.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.method.is_empty() || self.url.is_empty() {
            return Err(RelayError::MissingFields);
        }
        Ok(())
    }

    /// Request payload, if any. An empty body means no payload.
    pub fn payload(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }
}
