//! Accept loop.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use metricbox_core::error::Result;

use crate::app_state::AppState;
use crate::transport::tcp::run_session;

pub struct Server {
    listener: TcpListener,
    app: AppState,
    conn_seq: AtomicU64,
}

impl Server {
    /// Wrap an already bound listener (tests bind `127.0.0.1:0`).
    pub fn new(listener: TcpListener, app: AppState) -> Self {
        Self {
            listener,
            app,
            conn_seq: AtomicU64::new(1),
        }
    }

    /// Bind the address from `app`'s config.
    pub async fn bind(app: AppState) -> Result<Self> {
        let addr = app.cfg().server.listen_addr()?;
        let listener = TcpListener::bind(addr).await?;
        Ok(Self::new(listener, app))
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept until `shutdown` fires. Each connection gets its own task and
    /// its own `Session`; a failing connection never affects the others.
    pub async fn serve(self, shutdown: CancellationToken) -> Result<()> {
        tracing::info!(
            listen = %self.local_addr()?,
            capacity = self.app.cfg().retention.capacity,
            "metricbox-server accepting connections"
        );

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("shutdown requested, accept loop stopped");
                    break;
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(a) => a,
                        Err(e) => {
                            tracing::warn!(error = %e, "accept failed");
                            continue;
                        }
                    };
                    let conn_id = self.conn_seq.fetch_add(1, Ordering::Relaxed);
                    let span = tracing::info_span!("conn", conn_id, %peer);
                    let app = self.app.clone();
                    let shutdown = shutdown.child_token();
                    tokio::spawn(
                        async move {
                            if let Err(e) = run_session(app, stream, peer, shutdown).await {
                                tracing::debug!(error = %e, "connection ended with transport error");
                            }
                        }
                        .instrument(span),
                    );
                }
            }
        }

        Ok(())
    }
}
