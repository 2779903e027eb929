//! Capability-based attribute selection.
//!
//! Groups are appended in a fixed order (countable, gauge, rated, sampled), so
//! a timer yields `count`, the four rates, then the ten sample statistics.

use crate::metric::Metric;
use crate::value::Value;

/// Ordered `(label, value)` pairs read from one metric.
pub type AttributeSet = Vec<(&'static str, Value)>;

pub const COUNT: &str = "count";
pub const VALUE: &str = "value";
pub const RATE_LABELS: [&str; 4] = ["mean_rate", "m1_rate", "m5_rate", "m15_rate"];
pub const SAMPLE_LABELS: [&str; 10] = [
    "min", "mean", "max", "stddev", "p50", "p75", "p95", "p98", "p99", "p999",
];

pub fn attributes_for(metric: &Metric) -> AttributeSet {
    let mut out = AttributeSet::new();

    if let Some(c) = metric.as_counting() {
        out.push((COUNT, Value::Int(c.count())));
    }

    if let Some(g) = metric.as_gauge() {
        out.push((VALUE, g.value()));
    }

    if let Some(m) = metric.as_metered() {
        let r = m.rates();
        let values = [r.mean, r.m1, r.m5, r.m15];
        out.extend(RATE_LABELS.into_iter().zip(values.map(Value::Float)));
    }

    if let Some(s) = metric.as_sampling() {
        // one snapshot per metric so all statistics describe the same values
        let s = s.sample();
        out.push(("min", Value::Int(s.min())));
        out.push(("mean", Value::Float(s.mean())));
        out.push(("max", Value::Int(s.max())));
        out.push(("stddev", Value::Float(s.stddev())));
        let quantiles = [s.median(), s.p75(), s.p95(), s.p98(), s.p99(), s.p999()];
        out.extend(SAMPLE_LABELS[4..].iter().copied().zip(quantiles.map(Value::Float)));
    }

    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metric::{Counter, Histogram, Meter, Timer};

    fn labels(m: &Metric) -> Vec<&'static str> {
        attributes_for(m).into_iter().map(|(l, _)| l).collect()
    }

    #[test]
    fn counter_has_count_only() {
        let c = Arc::new(Counter::new());
        c.inc_by(3);
        assert_eq!(attributes_for(&Metric::from(c)), vec![(COUNT, Value::Int(3))]);
    }

    #[test]
    fn gauge_has_value_only() {
        assert_eq!(attributes_for(&Metric::gauge(|| "up")), vec![(VALUE, Value::from("up"))]);
    }

    #[test]
    fn other_has_nothing() {
        assert!(attributes_for(&Metric::other("x")).is_empty());
    }

    #[test]
    fn meter_is_count_then_rates() {
        let m = Metric::from(Arc::new(Meter::new()));
        assert_eq!(labels(&m), vec!["count", "mean_rate", "m1_rate", "m5_rate", "m15_rate"]);
    }

    #[test]
    fn histogram_is_count_then_sample() {
        let m = Metric::from(Arc::new(Histogram::new()));
        let mut expected = vec!["count"];
        expected.extend(SAMPLE_LABELS);
        assert_eq!(labels(&m), expected);
    }

    #[test]
    fn timer_concatenates_all_groups() {
        let m = Metric::from(Arc::new(Timer::new()));
        let mut expected = vec!["count"];
        expected.extend(RATE_LABELS);
        expected.extend(SAMPLE_LABELS);
        assert_eq!(labels(&m), expected);
        assert_eq!(labels(&m).len(), 15);
    }
}
