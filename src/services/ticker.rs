//! Periodic metrics refresh
//!
//! Each tick adds zero to two predictions to the running total and resamples
//! the hourly request rate. The ticker itself holds no timer; the dashboard
//! owns the interval so that dropping the dashboard stops the refresh.

use crate::domain::{Metrics, RequestsPerHour};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Default refresh period
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// New predictions counted per tick
pub const PREDICTIONS_PER_TICK: RangeInclusive<u64> = 0..=2;

/// Resampling range of the hourly request rate
pub const REQUESTS_PER_HOUR_RANGE: RangeInclusive<u32> = 40..=59;

/// What a single tick changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub new_predictions: u64,
    pub requests_per_hour: RequestsPerHour,
}

pub struct MetricsTicker {
    period: Duration,
    rng: StdRng,
}

impl MetricsTicker {
    pub fn new(period: Duration) -> Self {
        Self::with_rng(period, StdRng::from_entropy())
    }

    pub fn seeded(period: Duration, seed: u64) -> Self {
        Self::with_rng(period, StdRng::seed_from_u64(seed))
    }

    fn with_rng(period: Duration, rng: StdRng) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            rng,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Timer whose first tick fires one full period from now
    ///
    /// Missed ticks are delayed rather than bursted, so a stalled dashboard
    /// never applies several refreshes back to back.
    pub fn interval(&self) -> Interval {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    /// Apply one refresh to `metrics`
    pub fn tick(&mut self, metrics: &mut Metrics) -> TickOutcome {
        let outcome = TickOutcome {
            new_predictions: self.rng.gen_range(PREDICTIONS_PER_TICK),
            requests_per_hour: RequestsPerHour::new(self.rng.gen_range(REQUESTS_PER_HOUR_RANGE)),
        };
        metrics.record_tick(outcome.new_predictions, outcome.requests_per_hour);
        outcome
    }
}

impl Default for MetricsTicker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}
