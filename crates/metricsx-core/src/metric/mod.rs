//! Metric model.
//!
//! Metrics form a closed set of kinds. What a renderer can read from a metric
//! is described by capabilities (countable, gauge-valued, rated, sampled), so a
//! timer is countable, rated and sampled at the same time. Each kind declares
//! its capabilities statically in [`MetricKind::capabilities`].

pub mod counter;
pub mod gauge;
pub mod histogram;
pub mod meter;

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

pub use counter::Counter;
pub use gauge::{ratio, Gauge};
pub use histogram::{Histogram, Sample, Timer, DEFAULT_RESERVOIR_SIZE};
pub use meter::{Meter, Rates};

/// Something that counts events.
pub trait Counting {
    fn count(&self) -> i64;
}

/// Something that tracks event rates (events per second).
pub trait Metered: Counting {
    fn rates(&self) -> Rates;
}

/// Something that keeps a statistical sample of recorded values.
pub trait Sampling {
    fn sample(&self) -> Sample;
}

/// The closed set of metric kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Counter,
    Gauge,
    Meter,
    Histogram,
    Timer,
    Other,
}

impl MetricKind {
    /// Type tag used by the JSON encoder.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Meter => "meter",
            MetricKind::Histogram => "histogram",
            MetricKind::Timer => "timer",
            MetricKind::Other => "metric",
        }
    }

    pub const fn capabilities(self) -> Capabilities {
        match self {
            MetricKind::Counter => Capabilities { countable: true, gauge: false, rated: false, sampled: false },
            MetricKind::Gauge => Capabilities { countable: false, gauge: true, rated: false, sampled: false },
            MetricKind::Meter => Capabilities { countable: true, gauge: false, rated: true, sampled: false },
            MetricKind::Histogram => Capabilities { countable: true, gauge: false, rated: false, sampled: true },
            MetricKind::Timer => Capabilities { countable: true, gauge: false, rated: true, sampled: true },
            MetricKind::Other => Capabilities::NONE,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability flags of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub countable: bool,
    pub gauge: bool,
    pub rated: bool,
    pub sampled: bool,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities { countable: false, gauge: false, rated: false, sampled: false };
}

/// A registered metric. Cloning is cheap (shared handle).
#[derive(Clone)]
pub enum Metric {
    Counter(Arc<Counter>),
    Gauge(Arc<dyn Gauge>),
    Meter(Arc<Meter>),
    Histogram(Arc<Histogram>),
    Timer(Arc<Timer>),
    /// Anything else; rendered through its `Display` form.
    Other(Arc<dyn fmt::Display + Send + Sync>),
}

impl Metric {
    pub fn gauge<G: Gauge + 'static>(gauge: G) -> Self {
        Metric::Gauge(Arc::new(gauge))
    }

    pub fn other<D: fmt::Display + Send + Sync + 'static>(display: D) -> Self {
        Metric::Other(Arc::new(display))
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            Metric::Counter(_) => MetricKind::Counter,
            Metric::Gauge(_) => MetricKind::Gauge,
            Metric::Meter(_) => MetricKind::Meter,
            Metric::Histogram(_) => MetricKind::Histogram,
            Metric::Timer(_) => MetricKind::Timer,
            Metric::Other(_) => MetricKind::Other,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind().capabilities()
    }

    pub fn as_counting(&self) -> Option<&dyn Counting> {
        match self {
            Metric::Counter(c) => Some(&**c),
            Metric::Meter(m) => Some(&**m),
            Metric::Histogram(h) => Some(&**h),
            Metric::Timer(t) => Some(&**t),
            Metric::Gauge(_) | Metric::Other(_) => None,
        }
    }

    pub fn as_gauge(&self) -> Option<&dyn Gauge> {
        match self {
            Metric::Gauge(g) => Some(&**g),
            _ => None,
        }
    }

    pub fn as_metered(&self) -> Option<&dyn Metered> {
        match self {
            Metric::Meter(m) => Some(&**m),
            Metric::Timer(t) => Some(&**t),
            _ => None,
        }
    }

    pub fn as_sampling(&self) -> Option<&dyn Sampling> {
        match self {
            Metric::Histogram(h) => Some(&**h),
            Metric::Timer(t) => Some(&**t),
            _ => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Counter(c) => write!(f, "{}", c.count()),
            Metric::Gauge(g) => write!(f, "{}", g.value()),
            Metric::Other(d) => write!(f, "{d}"),
            other => f.write_str(other.kind().as_str()),
        }
    }
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Metric").field(&self.kind()).finish()
    }
}

impl From<Arc<Counter>> for Metric {
    fn from(v: Arc<Counter>) -> Self {
        Metric::Counter(v)
    }
}

impl From<Arc<Meter>> for Metric {
    fn from(v: Arc<Meter>) -> Self {
        Metric::Meter(v)
    }
}

impl From<Arc<Histogram>> for Metric {
    fn from(v: Arc<Histogram>) -> Self {
        Metric::Histogram(v)
    }
}

impl From<Arc<Timer>> for Metric {
    fn from(v: Arc<Timer>) -> Self {
        Metric::Timer(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_agree_with_static_capabilities() {
        let metrics = [
            Metric::from(Arc::new(Counter::new())),
            Metric::gauge(|| 1),
            Metric::from(Arc::new(Meter::new())),
            Metric::from(Arc::new(Histogram::new())),
            Metric::from(Arc::new(Timer::new())),
            Metric::other("x"),
        ];
        for m in &metrics {
            let caps = m.capabilities();
            assert_eq!(caps.countable, m.as_counting().is_some(), "{:?}", m.kind());
            assert_eq!(caps.gauge, m.as_gauge().is_some(), "{:?}", m.kind());
            assert_eq!(caps.rated, m.as_metered().is_some(), "{:?}", m.kind());
            assert_eq!(caps.sampled, m.as_sampling().is_some(), "{:?}", m.kind());
        }
    }

    #[test]
    fn display_falls_back_to_inner_form() {
        assert_eq!(Metric::other("bar").to_string(), "bar");
        assert_eq!(Metric::gauge(|| 2.5).to_string(), "2.5");
        assert_eq!(Metric::from(Arc::new(Timer::new())).to_string(), "timer");
    }
}
