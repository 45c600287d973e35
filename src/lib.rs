//! JSON relay library.
//!
//! A single `POST /api` endpoint takes `{"method", "url", "body"?}`, performs
//! that call against an external service with a bounded timeout, and returns
//! the upstream body verbatim. The frontend that drives it is served from a
//! static directory on `/` and `/static/*`.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::{CallSpec, RelayError};
