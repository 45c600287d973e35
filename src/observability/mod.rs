//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! relay handler, upstream client, server
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms via the metrics facade)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! Request IDs are attached by the HTTP layer (see `http::request`) and show
//! up on every span emitted by `TraceLayer`.

pub mod logging;
pub mod metrics;
