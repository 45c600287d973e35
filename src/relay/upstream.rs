//! Outbound call construction and execution.
//!
//! # Responsibilities
//! - Turn a validated `CallSpec` into an `OutboundCall` (method token, parsed URL)
//! - Perform one HTTP call with a bounded timeout behind the `Upstream` trait
//! - Read the upstream body, keeping whatever arrived if the read fails
//!
//! # Design Decisions
//! - The reqwest client is built once at startup and never mutated
//! - `Content-Type: application/json` is always sent; callers cannot override it
//! - Timeouts cover the whole exchange, body read included

use std::error::Error as StdError;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, Method};
use futures_util::future::BoxFuture;
use futures_util::StreamExt;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;
use crate::relay::error::RelayError;
use crate::relay::spec::CallSpec;

/// Content type attached to every outbound call.
pub const OUTBOUND_CONTENT_TYPE: &str = "application/json";

/// A fully constructed outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCall {
    pub method: Method,
    pub url: Url,
    pub body: Option<String>,
}

impl OutboundCall {
    /// Build the outbound call.
    ///
    /// A bad method token or a URL with broken syntax fails with `Construct`.
    /// A URL that parses but names no scheme, or a scheme other than http(s),
    /// fails with `UnsupportedScheme`: the call is well formed, it just cannot
    /// be delivered.
    pub fn from_spec(spec: &CallSpec) -> Result<Self, RelayError> {
        let method = Method::from_bytes(spec.method.as_bytes())
            .map_err(|e| RelayError::Construct(format!("invalid method {:?}: {}", spec.method, e)))?;

        if let Some(reason) = url_syntax_error(&spec.url) {
            return Err(invalid_url(&spec.url, reason));
        }
        let url = match Url::parse(&spec.url) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                return Err(UpstreamError::UnsupportedScheme {
                    url: spec.url.clone(),
                    scheme: String::new(),
                }
                .into());
            }
            Err(e) => return Err(invalid_url(&spec.url, e)),
        };
        if !matches!(url.scheme(), "http" | "https") {
            return Err(UpstreamError::UnsupportedScheme {
                url: spec.url.clone(),
                scheme: url.scheme().to_string(),
            }
            .into());
        }

        Ok(Self {
            method,
            url,
            body: spec.payload().map(str::to_string),
        })
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }
}

fn invalid_url(raw: &str, reason: impl std::fmt::Display) -> RelayError {
    RelayError::Construct(format!("invalid url {:?}: {}", raw, reason))
}

/// Syntax the `url` crate tolerates but a strict URI parser refuses.
fn url_syntax_error(raw: &str) -> Option<String> {
    if raw.starts_with(':') {
        return Some("missing protocol scheme".to_string());
    }
    if raw.bytes().any(|b| b.is_ascii_control()) {
        return Some("invalid control character in URL".to_string());
    }
    let bytes = raw.as_bytes();
    for (i, _) in raw.match_indices('%') {
        let escape = bytes.get(i + 1..i + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            let end = (i + 3).min(raw.len());
            let shown = raw.get(i..end).unwrap_or("%");
            return Some(format!("invalid URL escape {:?}", shown));
        }
    }
    None
}

/// What came back from the upstream. Only the body is relayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Bytes,
    /// The body read failed part way; `body` holds what arrived before the failure.
    pub truncated: bool,
}

/// Failure to obtain an upstream response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The URL has no scheme, or one the client cannot speak.
    #[error("{url:?}: unsupported protocol scheme {scheme:?}")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("upstream timed out after {}s: {message}", .after.as_secs())]
    Timeout { after: Duration, message: String },

    /// Connection refused, DNS failure, TLS failure, reset, ...
    #[error("{0}")]
    Transport(String),
}

impl From<UpstreamError> for RelayError {
    fn from(err: UpstreamError) -> Self {
        RelayError::BadGateway(err.to_string())
    }
}

/// Capability to perform one HTTP call with a timeout.
pub trait Upstream: Send + Sync {
    fn perform(&self, call: OutboundCall) -> BoxFuture<'_, Result<UpstreamResponse, UpstreamError>>;
}

/// `Upstream` backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpUpstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let timeout = config.timeout();
        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str());
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        let message = error_chain(&err);
        if err.is_timeout() {
            UpstreamError::Timeout {
                after: self.timeout,
                message,
            }
        } else {
            UpstreamError::Transport(message)
        }
    }
}

impl Upstream for HttpUpstream {
    fn perform(&self, call: OutboundCall) -> BoxFuture<'_, Result<UpstreamResponse, UpstreamError>> {
        Box::pin(async move {
            let mut request = self
                .client
                .request(call.method, call.url)
                .header(header::CONTENT_TYPE, OUTBOUND_CONTENT_TYPE);
            if let Some(body) = call.body {
                request = request.body(body);
            }

            let response = request.send().await.map_err(|e| self.classify(e))?;
            let status = response.status().as_u16();

            let mut body = Vec::new();
            let mut truncated = false;
            let mut chunks = response.bytes_stream();
            while let Some(chunk) = chunks.next().await {
                match chunk {
                    Ok(chunk) => body.extend_from_slice(&chunk),
                    Err(e) => {
                        tracing::warn!(
                            status,
                            bytes_read = body.len(),
                            error = %error_chain(&e),
                            "Upstream body read failed, relaying partial body"
                        );
                        truncated = true;
                        break;
                    }
                }
            }

            Ok(UpstreamResponse {
                status,
                body: Bytes::from(body),
                truncated,
            })
        })
    }
}

/// Render an error with all of its sources, outermost first.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
