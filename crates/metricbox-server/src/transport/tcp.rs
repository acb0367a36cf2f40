//! Per-connection handler.
//!
//! Responsibilities:
//! - Frame the socket into lines (`LineCodec`)
//! - Feed each line to a connection-local `Session` and write its reply
//! - Stop on client close, transport error, or server shutdown
//!
//! Command errors never end the loop; only I/O does.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tokio_util::sync::CancellationToken;

use metricbox_core::error::{ReplyCode, Result};
use metricbox_core::protocol::Reply;

use crate::app_state::AppState;
use crate::session::Session;
use crate::transport::codec::{Inbound, LineCodec};

pub async fn run_session(
    app: AppState,
    stream: TcpStream,
    peer: SocketAddr,
    shutdown: CancellationToken,
) -> Result<()> {
    let codec = LineCodec::new(app.cfg().limits.max_line_bytes);
    let (mut tx, mut rx) = Framed::new(stream, codec).split();
    let mut session = Session::new(app.registry());

    tracing::debug!(%peer, "connection opened");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,

            incoming = rx.next() => {
                let Some(incoming) = incoming else { break; };
                let reply = match incoming? {
                    Inbound::Line(line) => session.handle_line(&line),
                    Inbound::Overlong => {
                        tracing::debug!(%peer, "line exceeds limit, discarded");
                        Reply::Error(ReplyCode::Err)
                    }
                    Inbound::NotUtf8 => {
                        tracing::debug!(%peer, "line is not utf-8, discarded");
                        Reply::Error(ReplyCode::Unrecognized)
                    }
                };
                tx.send(reply).await?;
            }
        }
    }

    tracing::debug!(%peer, binding = ?session.binding(), "connection closed");
    Ok(())
}
