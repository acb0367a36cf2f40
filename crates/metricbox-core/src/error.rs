//! Shared error type across metricbox crates.

use thiserror::Error;

/// Client-facing reply codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyCode {
    /// Recognised command that failed (arity, state, lookup, value).
    Err,
    /// Blank line or unknown keyword.
    Unrecognized,
}

impl ReplyCode {
    /// String representation written on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            ReplyCode::Err => "ERR",
            ReplyCode::Unrecognized => "ERR UNRECOGNIZED CMD",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("malformed command: {0}")]
    MalformedCommand(String),
    #[error("unrecognized command")]
    UnrecognizedCommand,
    #[error("no source registered on this connection")]
    NotBound,
    #[error("duplicate source: {0}")]
    DuplicateSource(String),
    #[error("unknown source: {0}")]
    UnknownSource(String),
    #[error("unknown metric: {source_name}/{metric}")]
    UnknownMetric { source_name: String, metric: String },
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl MetricsError {
    /// Map internal error to a stable client-facing code.
    pub fn reply_code(&self) -> ReplyCode {
        match self {
            MetricsError::UnrecognizedCommand => ReplyCode::Unrecognized,
            MetricsError::MalformedCommand(_)
            | MetricsError::NotBound
            | MetricsError::DuplicateSource(_)
            | MetricsError::UnknownSource(_)
            | MetricsError::UnknownMetric { .. }
            | MetricsError::InvalidValue(_)
            | MetricsError::InvalidConfig(_)
            | MetricsError::Io(_) => ReplyCode::Err,
        }
    }
}
