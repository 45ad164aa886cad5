//! Host server for the `mranv` dashboard plugin

#![forbid(unsafe_code)]

use clap::Parser;
use mranv_core::{Config, Error, Result, init_logging};
use mranv_web::{default_services, start};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Command line interface for the host server
#[derive(Parser)]
#[command(
    name = "mranv-web-server",
    version = env!("CARGO_PKG_VERSION"),
    about = "Security dashboard plugin host",
    long_about = "Runs the mranv plugin lifecycle, mounts the dashboard and serves it over HTTP."
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host to bind to (overrides configuration)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides configuration)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // It's okay if .env doesn't exist
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: .env file not loaded: {e}");
    }

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.format = "json".to_string();
    }

    init_logging(&config.logging)?;

    if config.giphy.api_key.is_empty() {
        warn!("giphy.api_key is not set; the refresh action will fail until MRANV__GIPHY__API_KEY is provided");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| Error::configuration(format!("Invalid server address: {e}")))?;
    let listener = TcpListener::bind(&addr).await?;

    let services = default_services(&config)?;
    let app = start(&config, services).await?;

    info!(version = env!("CARGO_PKG_VERSION"), greeting = %app.greeting, "mranv host ready");
    info!("Dashboard: http://{addr}{}", mranv_core::APP_BASE_PATH);
    info!("Health:    http://{addr}/health");

    let served = axum::serve(listener, app.router.clone().into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await;

    app.shutdown().await;
    served?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve when the process is asked to stop
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down gracefully..."),
        () = terminate => info!("Received terminate signal, shutting down gracefully..."),
    }
}
