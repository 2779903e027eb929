//! Throughput meter.
//!
//! One, five and fifteen minute rates are exponentially weighted moving
//! averages updated in 5 second ticks. Ticks are applied lazily whenever the
//! meter is marked or read, so no background task is needed.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::{Counting, Metered};

const TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Rates in events per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rates {
    pub mean: f64,
    pub m1: f64,
    pub m5: f64,
    pub m15: f64,
}

#[derive(Debug)]
struct Ewma {
    alpha: f64,
    rate: f64,
    initialized: bool,
}

impl Ewma {
    fn over_minutes(minutes: f64) -> Self {
        let interval = TICK_INTERVAL.as_secs_f64();
        Self {
            alpha: 1.0 - (-interval / 60.0 / minutes).exp(),
            rate: 0.0,
            initialized: false,
        }
    }

    fn tick(&mut self, events: u64) {
        let instant_rate = events as f64 / TICK_INTERVAL.as_secs_f64();
        if self.initialized {
            self.rate += self.alpha * (instant_rate - self.rate);
        } else {
            self.rate = instant_rate;
            self.initialized = true;
        }
    }
}

#[derive(Debug)]
struct MeterState {
    last_tick: Instant,
    uncounted: u64,
    m1: Ewma,
    m5: Ewma,
    m15: Ewma,
}

impl MeterState {
    fn tick_until(&mut self, now: Instant) {
        let age = now.saturating_duration_since(self.last_tick);
        let ticks = age.as_nanos() / TICK_INTERVAL.as_nanos();
        for _ in 0..ticks {
            let events = std::mem::take(&mut self.uncounted);
            self.m1.tick(events);
            self.m5.tick(events);
            self.m15.tick(events);
            self.last_tick += TICK_INTERVAL;
        }
    }
}

/// Marks events and reports their rates.
#[derive(Debug)]
pub struct Meter {
    count: AtomicI64,
    start: Instant,
    state: Mutex<MeterState>,
}

impl Default for Meter {
    fn default() -> Self {
        Self::started_at(Instant::now())
    }
}

impl Meter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Meter whose clock starts at `start` (tests drive time explicitly).
    pub fn started_at(start: Instant) -> Self {
        Self {
            count: AtomicI64::new(0),
            start,
            state: Mutex::new(MeterState {
                last_tick: start,
                uncounted: 0,
                m1: Ewma::over_minutes(1.0),
                m5: Ewma::over_minutes(5.0),
                m15: Ewma::over_minutes(15.0),
            }),
        }
    }

    pub fn mark(&self) {
        self.mark_n(1);
    }

    pub fn mark_n(&self, n: u64) {
        self.mark_n_at(n, Instant::now());
    }

    pub fn mark_n_at(&self, n: u64, now: Instant) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.tick_until(now);
        state.uncounted = state.uncounted.saturating_add(n);
        self.count.fetch_add(i64::try_from(n).unwrap_or(i64::MAX), Ordering::Relaxed);
    }

    pub fn count(&self) -> i64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn rates(&self) -> Rates {
        self.rates_at(Instant::now())
    }

    pub fn rates_at(&self, now: Instant) -> Rates {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.tick_until(now);
        Rates {
            mean: self.mean_rate_at(now),
            m1: state.m1.rate,
            m5: state.m5.rate,
            m15: state.m15.rate,
        }
    }

    pub fn mean_rate(&self) -> f64 {
        self.mean_rate_at(Instant::now())
    }

    pub fn m1_rate(&self) -> f64 {
        self.rates().m1
    }

    pub fn m5_rate(&self) -> f64 {
        self.rates().m5
    }

    pub fn m15_rate(&self) -> f64 {
        self.rates().m15
    }

    pub fn mean_rate_at(&self, now: Instant) -> f64 {
        let count = self.count();
        let elapsed = now.saturating_duration_since(self.start).as_secs_f64();
        if count == 0 || elapsed == 0.0 {
            return 0.0;
        }
        count as f64 / elapsed
    }
}

impl Counting for Meter {
    fn count(&self) -> i64 {
        Meter::count(self)
    }
}

impl Metered for Meter {
    fn rates(&self) -> Rates {
        Meter::rates(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_rate_is_count_over_elapsed() {
        let t0 = Instant::now();
        let m = Meter::started_at(t0);
        m.mark_n_at(10, t0);
        let rates = m.rates_at(t0 + Duration::from_secs(20));
        assert_eq!(m.count(), 10);
        assert!((rates.mean - 0.5).abs() < 1e-9);
    }

    #[test]
    fn first_tick_sets_instant_rate() {
        let t0 = Instant::now();
        let m = Meter::started_at(t0);
        m.mark_n_at(5, t0 + Duration::from_secs(1));
        let rates = m.rates_at(t0 + Duration::from_secs(5));
        assert!((rates.m1 - 1.0).abs() < 1e-9);
        assert!((rates.m5 - 1.0).abs() < 1e-9);
        assert!((rates.m15 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rates_decay_while_idle() {
        let t0 = Instant::now();
        let m = Meter::started_at(t0);
        m.mark_n_at(60, t0);
        let early = m.rates_at(t0 + Duration::from_secs(5));
        let late = m.rates_at(t0 + Duration::from_secs(300));
        assert!(late.m1 < early.m1);
        assert!(late.m15 < early.m15);
        assert!(late.m1 < late.m15, "short window decays faster");
    }

    #[test]
    fn fresh_meter_reports_zero() {
        let m = Meter::new();
        assert_eq!(m.rates().mean, 0.0);
        assert_eq!(m.count(), 0);
    }
}
