//! Relay handler subsystem.
//!
//! # Data Flow
//! ```text
//! POST /api {"method","url","body"?}
//!     → handler.rs (accept POST only, read body)
//!     → spec.rs (decode + validate CallSpec)
//!     → upstream.rs (construct OutboundCall, perform with timeout)
//!     → pipeline.rs (relay upstream body bytes verbatim)
//!     → 200 application/json | {"error": "..."} with 400/405/502
//! ```
//!
//! # Design Decisions
//! - Upstream status is never forwarded; callers see 200 or a relay error
//! - The network call sits behind the `Upstream` trait so the pipeline runs without a network
//! - No retries: every failure is terminal for its invocation

pub mod error;
pub mod handler;
pub mod pipeline;
pub mod spec;
pub mod upstream;

pub use error::RelayError;
pub use handler::{relay_handler, SharedUpstream};
pub use pipeline::{forward, Relayed};
pub use spec::CallSpec;
pub use upstream::{HttpUpstream, OutboundCall, Upstream, UpstreamError, UpstreamResponse};
