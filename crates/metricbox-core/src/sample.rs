//! A single observation inside a metric buffer.

use std::fmt;

/// Logical time: whole seconds since the Unix epoch.
pub type Timestamp = i64;

/// One `(timestamp, value)` observation. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: Timestamp,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Wire form: `<timestamp>:<value>` with the value fixed to two decimals.
impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:.2}", self.timestamp, self.value)
    }
}
