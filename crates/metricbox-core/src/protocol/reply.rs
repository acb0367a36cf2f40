//! Reply rendering.
//!
//! Every reply is a single line; the transport appends the `\n` terminator.

use std::fmt::{self, Write};

use crate::error::{MetricsError, ReplyCode};
use crate::protocol::command::{KW_LIST, KW_METRICS};
use crate::sample::Sample;

/// Server reply to exactly one command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Ack,
    /// `(name, kind)` pairs in registration order.
    List(Vec<(String, String)>),
    MetricNames { source: String, names: Vec<String> },
    Samples { source: String, metric: String, samples: Vec<Sample> },
    Error(ReplyCode),
}

impl From<&MetricsError> for Reply {
    fn from(e: &MetricsError) -> Self {
        Reply::Error(e.reply_code())
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ack => f.write_str("ACK"),
            Reply::List(sources) => {
                f.write_str(KW_LIST)?;
                for (name, kind) in sources {
                    write!(f, " {name}:{kind}")?;
                }
                Ok(())
            }
            Reply::MetricNames { source, names } => {
                write!(f, "{KW_METRICS} {source}")?;
                for n in names {
                    f.write_char(' ')?;
                    f.write_str(n)?;
                }
                Ok(())
            }
            Reply::Samples { source, metric, samples } => {
                write!(f, "{KW_METRICS} {source} {metric}")?;
                for s in samples {
                    write!(f, " {s}")?;
                }
                Ok(())
            }
            Reply::Error(code) => f.write_str(code.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_bare_keyword() {
        assert_eq!(Reply::List(vec![]).to_string(), "LIST");
    }

    #[test]
    fn list_joins_name_kind_pairs() {
        let r = Reply::List(vec![
            ("water".into(), "source".into()),
            ("tank".into(), "barrel".into()),
        ]);
        assert_eq!(r.to_string(), "LIST water:source tank:barrel");
    }

    #[test]
    fn metric_names_without_metrics() {
        let r = Reply::MetricNames { source: "water".into(), names: vec![] };
        assert_eq!(r.to_string(), "METRICS water");
    }

    #[test]
    fn samples_render_oldest_first() {
        let r = Reply::Samples {
            source: "water".into(),
            metric: "level".into(),
            samples: vec![Sample::new(0, 2.0), Sample::new(5, 3.456)],
        };
        assert_eq!(r.to_string(), "METRICS water level 0:2.00 5:3.46");
    }

    #[test]
    fn errors_render_reply_code() {
        assert_eq!(Reply::from(&MetricsError::NotBound).to_string(), "ERR");
        assert_eq!(
            Reply::from(&MetricsError::UnrecognizedCommand).to_string(),
            "ERR UNRECOGNIZED CMD"
        );
    }
}
