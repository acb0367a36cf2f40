//! Transport layer (TCP, newline-delimited lines).
//!
//! Exposes the line codec that frames the byte stream and the per-connection
//! loop that feeds decoded lines into a `Session`.

pub mod codec;
pub mod tcp;
