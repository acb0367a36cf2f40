use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use metricbox_core::error::{MetricsError, Result};
use metricbox_core::sample::Sample;

use super::source::Source;
use crate::clock::Clock;

struct SourceEntry {
    source: Source,
    registered_seq: u64,
}

/// Source registry:
/// - `source_name -> Source` (each entry locked independently)
/// - registration sequence numbers keep `list()` in registration order
pub struct Registry {
    sources: DashMap<String, SourceEntry>,
    seq: AtomicU64,
    capacity: usize,
    clock: Arc<dyn Clock>,
}

impl Registry {
    /// `capacity` is the per-metric retention applied to every buffer.
    pub fn new(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            sources: DashMap::new(),
            seq: AtomicU64::new(1),
            capacity,
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Create a source. Exactly one of any set of racing calls for the same
    /// name succeeds; the rest get `DuplicateSource`.
    pub fn register(&self, name: &str, kind: &str) -> Result<()> {
        if name.is_empty() || kind.is_empty() {
            return Err(MetricsError::MalformedCommand(
                "source name and kind must not be empty".into(),
            ));
        }
        match self.sources.entry(name.to_string()) {
            Entry::Occupied(_) => Err(MetricsError::DuplicateSource(name.to_string())),
            Entry::Vacant(v) => {
                let registered_seq = self.seq.fetch_add(1, Ordering::Relaxed);
                v.insert(SourceEntry {
                    source: Source::new(name, kind, self.capacity),
                    registered_seq,
                });
                Ok(())
            }
        }
    }

    /// `(name, kind)` for every source, in registration order.
    pub fn list(&self) -> Vec<(String, String)> {
        let mut all: Vec<(u64, String, String)> = self
            .sources
            .iter()
            .map(|e| {
                let v = e.value();
                (
                    v.registered_seq,
                    v.source.name().to_string(),
                    v.source.kind().to_string(),
                )
            })
            .collect();
        all.sort_unstable_by_key(|(seq, _, _)| *seq);
        all.into_iter().map(|(_, name, kind)| (name, kind)).collect()
    }

    /// Copy of the named source, taken under its read lock.
    pub fn lookup(&self, name: &str) -> Result<Source> {
        self.sources
            .get(name)
            .map(|e| e.value().source.clone())
            .ok_or_else(|| MetricsError::UnknownSource(name.to_string()))
    }

    /// Stamp `value` with the clock's current time and append it.
    pub fn record_metric(&self, source: &str, metric: &str, value: f64) -> Result<()> {
        let mut entry = self
            .sources
            .get_mut(source)
            .ok_or_else(|| MetricsError::UnknownSource(source.to_string()))?;
        let now = self.clock.now();
        entry.source.record_metric(metric, now, value);
        Ok(())
    }

    pub fn query_metric_names(&self, source: &str) -> Result<Vec<String>> {
        self.sources
            .get(source)
            .map(|e| e.value().source.metric_names())
            .ok_or_else(|| MetricsError::UnknownSource(source.to_string()))
    }

    pub fn query_samples(&self, source: &str, metric: &str) -> Result<Vec<Sample>> {
        let entry = self
            .sources
            .get(source)
            .ok_or_else(|| MetricsError::UnknownSource(source.to_string()))?;
        entry
            .source
            .get_metric(metric)
            .map(|b| b.snapshot())
            .ok_or_else(|| MetricsError::UnknownMetric {
                source_name: source.to_string(),
                metric: metric.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::clock::ManualClock;

    fn registry(capacity: usize) -> (Registry, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (Registry::new(capacity, clock.clone()), clock)
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let (r, _) = registry(4);
        r.register("water", "source").unwrap();
        let err = r.register("water", "barrel").unwrap_err();
        assert!(matches!(err, MetricsError::DuplicateSource(ref n) if n == "water"));
        assert_eq!(r.list(), vec![("water".to_string(), "source".to_string())]);
    }

    #[test]
    fn list_keeps_registration_order() {
        let (r, _) = registry(4);
        for name in ["zeta", "alpha", "mid", "beta"] {
            r.register(name, "k").unwrap();
        }
        let names: Vec<String> = r.list().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid", "beta"]);
    }

    #[test]
    fn unknown_source_and_metric() {
        let (r, _) = registry(4);
        assert!(matches!(r.lookup("nope"), Err(MetricsError::UnknownSource(_))));
        assert!(matches!(
            r.record_metric("nope", "level", 1.0),
            Err(MetricsError::UnknownSource(_))
        ));
        assert!(matches!(r.query_metric_names("nope"), Err(MetricsError::UnknownSource(_))));
        r.register("water", "source").unwrap();
        assert!(matches!(
            r.query_samples("water", "level"),
            Err(MetricsError::UnknownMetric { .. })
        ));
    }

    #[test]
    fn samples_are_stamped_by_clock() {
        let (r, clock) = registry(4);
        r.register("water", "source").unwrap();
        assert!(r.query_metric_names("water").unwrap().is_empty());

        r.record_metric("water", "level", 1.0).unwrap();
        clock.advance(10);
        r.record_metric("water", "level", 2.0).unwrap();

        assert_eq!(r.query_metric_names("water").unwrap(), vec!["level".to_string()]);
        assert_eq!(
            r.query_samples("water", "level").unwrap(),
            vec![Sample::new(0, 1.0), Sample::new(10, 2.0)]
        );
        let src = r.lookup("water").unwrap();
        assert_eq!(src.kind(), "source");
        assert_eq!(src.get_metric("level").map(|b| b.len()), Some(2));
    }

    #[test]
    fn empty_name_is_malformed() {
        let (r, _) = registry(4);
        assert!(matches!(r.register("", "k"), Err(MetricsError::MalformedCommand(_))));
        assert!(r.is_empty());
    }

    #[test]
    fn concurrent_registration_has_one_winner() {
        let (r, _) = registry(4);
        let r = Arc::new(r);
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let r = Arc::clone(&r);
                std::thread::spawn(move || r.register("water", &format!("kind{i}")).is_ok())
            })
            .collect();
        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(r.len(), 1);
    }
}
