//! Command grammar.
//!
//! Parsing rules:
//! - Fields are separated by exactly one space; keywords are case-sensitive.
//! - Arity is checked before anything else, so `METRIC a b c` is malformed
//!   even if `b` would parse.
//! - Names must be non-empty (a double space yields an empty field).

use crate::error::{MetricsError, Result};

pub const KW_REGISTER: &str = "REGISTER";
pub const KW_LIST: &str = "LIST";
pub const KW_METRIC: &str = "METRIC";
pub const KW_METRICS: &str = "METRICS";

/// A parsed client command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `REGISTER <name> <kind>`
    Register { name: String, kind: String },
    /// `LIST`
    List,
    /// `METRIC <metric> <value>`
    Metric { metric: String, value: f64 },
    /// `METRICS <source>`
    MetricNames { source: String },
    /// `METRICS <source> <metric>`
    Samples { source: String, metric: String },
}

impl Command {
    /// Protocol keyword, logged with command failures.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Register { .. } => KW_REGISTER,
            Command::List => KW_LIST,
            Command::Metric { .. } => KW_METRIC,
            Command::MetricNames { .. } | Command::Samples { .. } => KW_METRICS,
        }
    }
}

/// Parse one line (without its terminator) into a command.
pub fn parse(line: &str) -> Result<Command> {
    let mut fields = line.split(' ');
    let keyword = fields.next().unwrap_or_default();
    let args: Vec<&str> = fields.collect();

    match keyword {
        KW_REGISTER => match args.as_slice() {
            [name, kind] => Ok(Command::Register {
                name: non_empty(name, "source name")?,
                kind: non_empty(kind, "source kind")?,
            }),
            _ => Err(arity(KW_REGISTER, 2, args.len())),
        },
        KW_LIST => match args.as_slice() {
            [] => Ok(Command::List),
            _ => Err(arity(KW_LIST, 0, args.len())),
        },
        KW_METRIC => match args.as_slice() {
            [metric, value] => {
                let metric = non_empty(metric, "metric name")?;
                let value = value
                    .parse::<f64>()
                    .map_err(|e| MetricsError::InvalidValue(format!("{value:?}: {e}")))?;
                Ok(Command::Metric { metric, value })
            }
            _ => Err(arity(KW_METRIC, 2, args.len())),
        },
        KW_METRICS => match args.as_slice() {
            [source] => Ok(Command::MetricNames {
                source: non_empty(source, "source name")?,
            }),
            [source, metric] => Ok(Command::Samples {
                source: non_empty(source, "source name")?,
                metric: non_empty(metric, "metric name")?,
            }),
            _ => Err(MetricsError::MalformedCommand(format!(
                "{KW_METRICS} takes 1 or 2 args, got {}",
                args.len()
            ))),
        },
        _ => Err(MetricsError::UnrecognizedCommand),
    }
}

fn non_empty(field: &str, what: &str) -> Result<String> {
    if field.is_empty() {
        return Err(MetricsError::MalformedCommand(format!("{what} must not be empty")));
    }
    Ok(field.to_string())
}

fn arity(keyword: &str, want: usize, got: usize) -> MetricsError {
    MetricsError::MalformedCommand(format!("{keyword} takes {want} args, got {got}"))
}
