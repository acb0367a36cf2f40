//! Line protocol (one command per line, one reply per command).
//!
//! - `command`: parses a raw line into a typed `Command`.
//! - `reply`: renders typed replies back into a single line.
//!
//! Parsing is panic-free: malformed input is reported as `MetricsError`
//! instead of indexing into slices, and every error maps to a reply code.

pub mod command;
pub mod reply;

pub use command::Command;
pub use reply::Reply;
