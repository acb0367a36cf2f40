//! metricbox core: transport-agnostic protocol primitives and error types.
//!
//! This crate defines the line protocol (command grammar and reply rendering),
//! the `Sample` value type and the error surface shared by the server and any
//! client tooling. It carries no transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! Every malformed line surfaces as a `MetricsError` that maps to a reply code,
//! so a hostile client can never take the server down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod sample;

/// Shared result type.
pub use error::{MetricsError, ReplyCode, Result};
pub use sample::Sample;
