//! JSON relay server.
//!
//! ```text
//!   browser ──POST /api {method,url,body}──▶ ┌──────────────┐ ──method url──▶ external API
//!           ◀─────── upstream body ───────── │ relay handler │ ◀── response ──
//!   browser ──GET / , /static/*───────────▶ │  static files │
//!                                           └──────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use json_relay::config::load_config;
use json_relay::observability::{logging, metrics};
use json_relay::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "json-relay")]
#[command(about = "Relay JSON API calls on behalf of a browser frontend", long_about = None)]
struct Cli {
    /// Optional TOML config file. `PORT` in the environment overrides the port.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding index.html and static assets.
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(dir) = cli.static_dir {
        config.static_files.dir = dir;
    }

    logging::init_logging(&config.observability);
    tracing::info!("json-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        port = config.listener.port,
        upstream_timeout_secs = config.upstream.timeout_secs,
        static_dir = %config.static_files.dir.display(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    let server = HttpServer::from_config(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
