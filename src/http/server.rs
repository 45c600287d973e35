//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Assemble the Axum Router once, from explicit configuration
//! - Serve the frontend entry document and static assets
//! - Mount the relay handler on `/api`
//! - Wire up middleware (request ID, tracing)
//! - Serve connections until shutdown is signalled

use std::sync::Arc;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::request::{MakeRequestUuidV4, RequestSpan};
use crate::relay::{relay_handler, HttpUpstream, SharedUpstream};

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a server that performs outbound calls through `upstream`.
    pub fn new(config: RelayConfig, upstream: SharedUpstream) -> Self {
        let router = Self::build_router(&config, upstream);
        Self { router, config }
    }

    /// Create a server backed by the real HTTP client.
    pub fn from_config(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let upstream = HttpUpstream::new(&config.upstream)?;
        tracing::debug!(timeout = ?upstream.timeout(), "Upstream client ready");
        Ok(Self::new(config, Arc::new(upstream)))
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, upstream: SharedUpstream) -> Router {
        let index = ServeFile::new(config.static_files.index_path());
        let assets = ServeDir::new(&config.static_files.dir);

        let api = Router::new()
            .route("/api", any(relay_handler))
            .with_state(upstream);

        Router::new()
            .route_service("/", index.clone())
            .nest_service("/static", assets)
            .merge(api)
            .fallback_service(index)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            static_dir = %self.config.static_files.dir.display(),
            upstream_timeout_secs = self.config.upstream.timeout_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}
