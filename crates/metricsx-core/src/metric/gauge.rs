//! Gauges: instantaneous values read at render time.
//!
//! A gauge is evaluated on the request path, once per render. Gauges
//! registered here must be cheap; the renderer does not guard against slow
//! ones.

use crate::value::Value;

/// A value read on demand.
pub trait Gauge: Send + Sync {
    fn value(&self) -> Value;
}

impl<F, V> Gauge for F
where
    F: Fn() -> V + Send + Sync,
    V: Into<Value>,
{
    fn value(&self) -> Value {
        self().into()
    }
}

/// `numerator / denominator`, or NaN when the denominator is zero or not finite.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() || numerator.is_nan() {
        return f64::NAN;
    }
    numerator / denominator
}
