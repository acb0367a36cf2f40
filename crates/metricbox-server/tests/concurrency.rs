//! Racing connections against one registry.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;

use metricbox_server::app_state::AppState;
use metricbox_server::clock::ManualClock;
use metricbox_server::config::ServerConfig;
use metricbox_server::server::Server;

async fn roundtrip(addr: std::net::SocketAddr, lines: Vec<String>) -> Vec<String> {
    let (rx, mut tx) = TcpStream::connect(addr).await.unwrap().into_split();
    let mut rx = BufReader::new(rx).lines();
    let mut out = Vec::with_capacity(lines.len());
    for l in lines {
        tx.write_all(format!("{l}\n").as_bytes()).await.unwrap();
        out.push(rx.next_line().await.unwrap().unwrap());
    }
    out
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn same_name_registers_exactly_once() {
    let mut cfg = ServerConfig::default();
    cfg.retention.capacity = 8;
    let app = AppState::new(cfg, Arc::new(ManualClock::new())).unwrap();
    let registry = app.registry();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server = Server::new(listener, app);
    let addr = server.local_addr().unwrap();
    let shutdown = CancellationToken::new();
    tokio::spawn(server.serve(shutdown.clone()));

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            tokio::spawn(roundtrip(
                addr,
                vec![format!("REGISTER water kind{i}"), format!("METRIC m{i} {i}")],
            ))
        })
        .collect();

    let mut acks = 0;
    for t in tasks {
        let replies = t.await.unwrap();
        if replies[0] == "ACK" {
            acks += 1;
            assert_eq!(replies[1], "ACK");
        } else {
            assert_eq!(replies, vec!["ERR".to_string(), "ERR".to_string()]);
        }
    }
    assert_eq!(acks, 1);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.query_metric_names("water").unwrap().len(), 1);
    shutdown.cancel();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_respect_capacity() {
    let mut cfg = ServerConfig::default();
    cfg.retention.capacity = 5;
    let app = AppState::new(cfg, Arc::new(ManualClock::new())).unwrap();
    let registry = app.registry();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server = Server::new(listener, app);
    let addr = server.local_addr().unwrap();
    let shutdown = CancellationToken::new();
    tokio::spawn(server.serve(shutdown.clone()));

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let mut lines = vec![format!("REGISTER src{i} sensor")];
            lines.extend((0..20).map(|v| format!("METRIC shared {v}")));
            tokio::spawn(roundtrip(addr, lines))
        })
        .collect();
    for t in tasks {
        assert!(t.await.unwrap().iter().all(|r| r == "ACK"));
    }

    assert_eq!(registry.len(), 8);
    for i in 0..8 {
        let values: Vec<f64> = registry
            .query_samples(&format!("src{i}"), "shared")
            .unwrap()
            .iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(values, vec![15.0, 16.0, 17.0, 18.0, 19.0]);
    }
    shutdown.cancel();
}
