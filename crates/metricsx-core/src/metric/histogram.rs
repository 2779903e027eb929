//! Histograms and timers.
//!
//! Values are kept in a sliding-window reservoir holding the most recent
//! `size` updates. Quantiles are linearly interpolated between neighbouring
//! sorted values at position `q * (n + 1)`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::meter::{Meter, Rates};
use super::{Counting, Metered, Sampling};

/// Default reservoir size (number of most recent values kept).
pub const DEFAULT_RESERVOIR_SIZE: usize = 1028;

/// Immutable, sorted copy of a reservoir.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sample {
    values: Vec<i64>,
}

impl Sample {
    pub fn new(mut values: Vec<i64>) -> Self {
        values.sort_unstable();
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn min(&self) -> i64 {
        self.values.first().copied().unwrap_or(0)
    }

    pub fn max(&self) -> i64 {
        self.values.last().copied().unwrap_or(0)
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.values.iter().map(|&v| v as f64).sum();
        sum / self.values.len() as f64
    }

    /// Sample standard deviation (n - 1 denominator).
    pub fn stddev(&self) -> f64 {
        let n = self.values.len();
        if n <= 1 {
            return 0.0;
        }
        let mean = self.mean();
        let sum_sq: f64 = self
            .values
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum();
        (sum_sq / (n - 1) as f64).sqrt()
    }

    /// Value at quantile `q` in `[0, 1]`.
    pub fn value(&self, q: f64) -> f64 {
        let n = self.values.len();
        if n == 0 || q.is_nan() {
            return 0.0;
        }
        let q = q.clamp(0.0, 1.0);
        let pos = q * (n + 1) as f64;
        let index = pos.floor() as usize;

        if index < 1 {
            return self.min() as f64;
        }
        if index >= n {
            return self.max() as f64;
        }

        let lower = self.values.get(index - 1).copied().unwrap_or(0) as f64;
        let upper = self.values.get(index).copied().unwrap_or(0) as f64;
        lower + (pos - pos.floor()) * (upper - lower)
    }

    pub fn median(&self) -> f64 {
        self.value(0.5)
    }

    pub fn p75(&self) -> f64 {
        self.value(0.75)
    }

    pub fn p95(&self) -> f64 {
        self.value(0.95)
    }

    pub fn p98(&self) -> f64 {
        self.value(0.98)
    }

    pub fn p99(&self) -> f64 {
        self.value(0.99)
    }

    pub fn p999(&self) -> f64 {
        self.value(0.999)
    }
}

/// Distribution of integer values.
#[derive(Debug)]
pub struct Histogram {
    count: AtomicI64,
    size: usize,
    window: Mutex<VecDeque<i64>>,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::with_reservoir_size(DEFAULT_RESERVOIR_SIZE)
    }
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reservoir_size(size: usize) -> Self {
        let size = size.max(1);
        Self {
            count: AtomicI64::new(0),
            size,
            window: Mutex::new(VecDeque::with_capacity(size.min(DEFAULT_RESERVOIR_SIZE))),
        }
    }

    pub fn update(&self, value: i64) {
        let mut window = self.window.lock().unwrap_or_else(PoisonError::into_inner);
        if window.len() >= self.size {
            window.pop_front();
        }
        window.push_back(value);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> i64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn sample(&self) -> Sample {
        let window = self.window.lock().unwrap_or_else(PoisonError::into_inner);
        Sample::new(window.iter().copied().collect())
    }
}

impl Counting for Histogram {
    fn count(&self) -> i64 {
        Histogram::count(self)
    }
}

impl Sampling for Histogram {
    fn sample(&self) -> Sample {
        Histogram::sample(self)
    }
}

/// Rate of events plus the distribution of their durations (nanoseconds).
#[derive(Debug, Default)]
pub struct Timer {
    meter: Meter,
    histogram: Histogram,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reservoir_size(size: usize) -> Self {
        Self {
            meter: Meter::new(),
            histogram: Histogram::with_reservoir_size(size),
        }
    }

    /// Timer whose meter clock starts at `start`.
    pub fn started_at(start: Instant) -> Self {
        Self {
            meter: Meter::started_at(start),
            histogram: Histogram::new(),
        }
    }

    pub fn update(&self, elapsed: Duration) {
        self.update_at(elapsed, Instant::now());
    }

    pub fn update_at(&self, elapsed: Duration, now: Instant) {
        let nanos = i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX);
        self.histogram.update(nanos);
        self.meter.mark_n_at(1, now);
    }

    /// Run `f` and record how long it took.
    pub fn time<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let out = f();
        self.update(start.elapsed());
        out
    }

    pub fn count(&self) -> i64 {
        self.histogram.count()
    }

    pub fn rates(&self) -> Rates {
        self.meter.rates()
    }

    pub fn rates_at(&self, now: Instant) -> Rates {
        self.meter.rates_at(now)
    }

    pub fn sample(&self) -> Sample {
        self.histogram.sample()
    }
}

impl Counting for Timer {
    fn count(&self) -> i64 {
        Timer::count(self)
    }
}

impl Metered for Timer {
    fn rates(&self) -> Rates {
        Timer::rates(self)
    }
}

impl Sampling for Timer {
    fn sample(&self) -> Sample {
        Timer::sample(self)
    }
}
