//! metricbox server binary.
//!
//! - Config: YAML file (`--config`, default `metricbox.yaml`) plus flag overrides
//! - Tracing via `RUST_LOG` (default `info`)
//! - Graceful shutdown on Ctrl-C / SIGTERM

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use metricbox_core::error::Result;
use metricbox_server::{app_state::AppState, clock::SystemClock, config, server::Server};

const DEFAULT_CONFIG: &str = "metricbox.yaml";

#[derive(Debug, Parser)]
#[command(name = "metricbox-server", about = "Line-protocol metrics collection server")]
struct Cli {
    /// Path to the YAML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.listen`.
    #[arg(long)]
    listen: Option<String>,

    /// Override `retention.capacity`.
    #[arg(long)]
    capacity: Option<usize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "metricbox-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_from_file(path)?,
        None if std::path::Path::new(DEFAULT_CONFIG).exists() => {
            config::load_from_file(DEFAULT_CONFIG)?
        }
        None => {
            tracing::info!(path = DEFAULT_CONFIG, "config file not found, using defaults");
            config::ServerConfig::default()
        }
    };
    if let Some(listen) = cli.listen {
        cfg.server.listen = listen;
    }
    if let Some(capacity) = cli.capacity {
        cfg.retention.capacity = capacity;
    }

    let app = AppState::new(cfg, Arc::new(SystemClock))?;
    let server = Server::bind(app).await?;

    let shutdown = CancellationToken::new();
    tokio::spawn(watch_signals(shutdown.clone()));

    server.serve(shutdown).await
}

async fn watch_signals(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    token.cancel();
}
