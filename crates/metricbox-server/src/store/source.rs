use std::collections::HashMap;

use metricbox_core::sample::Timestamp;

use super::buffer::MetricBuffer;

/// A registered data source and its metric buffers.
///
/// Buffers are created on first write, so every buffer reachable through
/// `get_metric` holds at least one sample.
#[derive(Debug, Clone)]
pub struct Source {
    name: String,
    kind: String,
    capacity: usize,
    metrics: HashMap<String, MetricBuffer>,
    /// First-seen order of `metrics` keys.
    order: Vec<String>,
}

impl Source {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            capacity,
            metrics: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn metric_names(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn record_metric(&mut self, name: &str, timestamp: Timestamp, value: f64) {
        if let Some(buf) = self.metrics.get_mut(name) {
            buf.record(timestamp, value);
            return;
        }
        let mut buf = MetricBuffer::new(self.capacity);
        buf.record(timestamp, value);
        self.metrics.insert(name.to_string(), buf);
        self.order.push(name.to_string());
    }

    pub fn get_metric(&self, name: &str) -> Option<&MetricBuffer> {
        self.metrics.get(name)
    }
}
