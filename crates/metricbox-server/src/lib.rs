//! metricbox server library entry.
//!
//! This crate wires the config loader, clock, metric store, session state
//! machine and TCP transport into a running server. It is consumed by the
//! binary (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod clock;
pub mod config;
pub mod server;
pub mod session;
pub mod store;
pub mod transport;
