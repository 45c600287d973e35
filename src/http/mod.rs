//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, routes)
//!     → request.rs (request ID, request span)
//!     → "/"          → frontend entry document
//!     → "/static/*"  → static assets
//!     → "/api"       → relay handler
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::{MakeRequestUuidV4, RequestSpan, X_REQUEST_ID};
pub use server::HttpServer;
