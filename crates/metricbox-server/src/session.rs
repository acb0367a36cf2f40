//! Per-connection protocol state machine.
//!
//! A session starts `Unbound` and moves to `Bound(source)` on its first
//! successful REGISTER. That is the only transition: later registrations on
//! the same connection still create sources but never rebind, and every other
//! command is stateless and goes straight to the registry.

use std::sync::Arc;

use metricbox_core::error::{MetricsError, Result};
use metricbox_core::protocol::{command, Command, Reply};

use crate::store::Registry;

/// Which source this connection registered, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Unbound,
    Bound(String),
}

pub struct Session {
    registry: Arc<Registry>,
    binding: Binding,
}

impl Session {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            binding: Binding::Unbound,
        }
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Parse and execute one line. Errors are folded into the reply; the
    /// session stays usable after any of them.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let cmd = match command::parse(line) {
            Ok(cmd) => cmd,
            Err(e) => {
                tracing::debug!(error = %e, "command rejected");
                return Reply::from(&e);
            }
        };
        let keyword = cmd.keyword();
        match self.execute(cmd) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::debug!(cmd = keyword, error = %e, "command failed");
                Reply::from(&e)
            }
        }
    }

    pub fn execute(&mut self, cmd: Command) -> Result<Reply> {
        match cmd {
            Command::Register { name, kind } => {
                self.registry.register(&name, &kind)?;
                tracing::info!(source = %name, kind = %kind, "source registered");
                // Only the first registration binds; later ones leave it as is.
                if self.binding == Binding::Unbound {
                    self.binding = Binding::Bound(name);
                }
                Ok(Reply::Ack)
            }
            Command::List => Ok(Reply::List(self.registry.list())),
            Command::Metric { metric, value } => {
                let Binding::Bound(source) = &self.binding else {
                    return Err(MetricsError::NotBound);
                };
                self.registry.record_metric(source, &metric, value)?;
                Ok(Reply::Ack)
            }
            Command::MetricNames { source } => {
                let names = self.registry.query_metric_names(&source)?;
                Ok(Reply::MetricNames { source, names })
            }
            Command::Samples { source, metric } => {
                let samples = self.registry.query_samples(&source, &metric)?;
                Ok(Reply::Samples {
                    source,
                    metric,
                    samples,
                })
            }
        }
    }
}
