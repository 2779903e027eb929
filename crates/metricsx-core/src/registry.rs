//! Process-wide metric registry.
//!
//! The registry is constructed once at boot and passed around explicitly
//! (usually behind an `Arc`). Producers register or look up metrics at any
//! time; renderers work on a [`Snapshot`], a sorted copy of the name -> metric
//! handles taken at render start, so registrations racing a render never show
//! up half-written.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::{MetricsError, Result};
use crate::metric::{Counter, Gauge, Histogram, Meter, Metric, MetricKind, Timer, DEFAULT_RESERVOIR_SIZE};

/// Sorted, immutable copy of the registry contents.
pub type Snapshot = BTreeMap<String, Metric>;

/// Name -> metric map with idempotent registration.
pub struct MetricRegistry {
    metrics: DashMap<String, Metric>,
    reservoir_size: usize,
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::with_reservoir_size(DEFAULT_RESERVOIR_SIZE)
    }
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose histograms and timers keep `size` recent values.
    pub fn with_reservoir_size(size: usize) -> Self {
        Self {
            metrics: DashMap::new(),
            reservoir_size: size,
        }
    }

    /// Register `metric` under `name` unless the name is taken.
    ///
    /// Returns the metric that ends up registered: the existing one when the
    /// name was already in use (the new one is dropped), `metric` otherwise.
    pub fn register(&self, name: impl Into<String>, metric: Metric) -> Metric {
        match self.metrics.entry(name.into()) {
            Entry::Occupied(e) => {
                tracing::debug!(name = %e.key(), kind = %metric.kind(), "metric already registered; keeping existing");
                e.get().clone()
            }
            Entry::Vacant(e) => {
                tracing::debug!(name = %e.key(), kind = %metric.kind(), "register metric");
                e.insert(metric.clone());
                metric
            }
        }
    }

    /// Register a gauge (idempotent, see [`MetricRegistry::register`]).
    pub fn gauge<G: Gauge + 'static>(&self, name: impl Into<String>, gauge: G) -> Metric {
        self.register(name, Metric::gauge(gauge))
    }

    pub fn counter(&self, name: &str) -> Result<Arc<Counter>> {
        match self.get_or_create(name, MetricKind::Counter, || Metric::Counter(Arc::new(Counter::new()))) {
            Metric::Counter(c) => Ok(c),
            other => Err(mismatch(name, MetricKind::Counter, &other)),
        }
    }

    pub fn meter(&self, name: &str) -> Result<Arc<Meter>> {
        match self.get_or_create(name, MetricKind::Meter, || Metric::Meter(Arc::new(Meter::new()))) {
            Metric::Meter(m) => Ok(m),
            other => Err(mismatch(name, MetricKind::Meter, &other)),
        }
    }

    pub fn histogram(&self, name: &str) -> Result<Arc<Histogram>> {
        let size = self.reservoir_size;
        match self.get_or_create(name, MetricKind::Histogram, || {
            Metric::Histogram(Arc::new(Histogram::with_reservoir_size(size)))
        }) {
            Metric::Histogram(h) => Ok(h),
            other => Err(mismatch(name, MetricKind::Histogram, &other)),
        }
    }

    pub fn timer(&self, name: &str) -> Result<Arc<Timer>> {
        let size = self.reservoir_size;
        match self.get_or_create(name, MetricKind::Timer, || Metric::Timer(Arc::new(Timer::with_reservoir_size(size)))) {
            Metric::Timer(t) => Ok(t),
            other => Err(mismatch(name, MetricKind::Timer, &other)),
        }
    }

    fn get_or_create(&self, name: &str, kind: MetricKind, make: impl FnOnce() -> Metric) -> Metric {
        if let Some(existing) = self.metrics.get(name) {
            return existing.value().clone();
        }
        self.metrics
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!(%name, %kind, "create metric");
                make()
            })
            .value()
            .clone()
    }

    pub fn get(&self, name: &str) -> Option<Metric> {
        self.metrics.get(name).map(|r| r.value().clone())
    }

    pub fn remove(&self, name: &str) -> Option<Metric> {
        self.metrics.remove(name).map(|(_, m)| m)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Sorted copy of all registered metrics.
    pub fn snapshot(&self) -> Snapshot {
        self.metrics
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }
}

fn mismatch(name: &str, expected: MetricKind, found: &Metric) -> MetricsError {
    MetricsError::KindMismatch {
        name: name.to_string(),
        expected,
        found: found.kind(),
    }
}

/// Join `base` and the non-empty `parts` with dots.
///
/// `name("orders.Service", &["placed"])` gives `orders.Service.placed`.
pub fn name(base: &str, parts: &[&str]) -> String {
    let mut out = String::from(base);
    for part in parts.iter().filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push('.');
        }
        out.push_str(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_skips_empty_parts() {
        assert_eq!(name("a.B", &["c", "", "d"]), "a.B.c.d");
        assert_eq!(name("", &["x"]), "x");
        assert_eq!(name("solo", &[]), "solo");
    }
}
