use std::collections::VecDeque;

use metricbox_core::sample::{Sample, Timestamp};

/// Fixed-capacity FIFO of samples for one metric.
///
/// Storage is allocated once at full capacity; recording into a full buffer
/// drops the oldest sample before appending, so `len() <= capacity()` always
/// holds and samples stay in insertion order.
#[derive(Debug, Clone)]
pub struct MetricBuffer {
    capacity: usize,
    samples: VecDeque<Sample>,
}

impl MetricBuffer {
    /// `capacity` is clamped to at least one sample.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, timestamp: Timestamp, value: f64) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample::new(timestamp, value));
    }

    /// Copy of the retained samples, oldest first.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(b: &MetricBuffer) -> Vec<f64> {
        b.snapshot().iter().map(|s| s.value).collect()
    }

    #[test]
    fn keeps_min_of_writes_and_capacity() {
        for cap in 1..=6usize {
            for n in 0..=12usize {
                let mut b = MetricBuffer::new(cap);
                for i in 0..n {
                    b.record(i as i64, i as f64);
                }
                assert_eq!(b.len(), n.min(cap), "cap={cap} n={n}");
                let expect: Vec<f64> = (n.saturating_sub(cap)..n).map(|i| i as f64).collect();
                assert_eq!(values(&b), expect, "cap={cap} n={n}");
            }
        }
    }

    #[test]
    fn evicts_oldest_first() {
        let mut b = MetricBuffer::new(4);
        for v in 1..=5 {
            b.record(0, v as f64);
        }
        assert_eq!(values(&b), vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn snapshot_is_detached() {
        let mut b = MetricBuffer::new(2);
        b.record(1, 1.0);
        let snap = b.snapshot();
        b.record(2, 2.0);
        b.record(3, 3.0);
        assert_eq!(snap, vec![Sample::new(1, 1.0)]);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut b = MetricBuffer::new(0);
        assert_eq!(b.capacity(), 1);
        b.record(0, 1.0);
        b.record(0, 2.0);
        assert_eq!(values(&b), vec![2.0]);
    }
}
