//! Bounded history and metrics ticker properties

use proptest::prelude::*;
use sentiment_ops::domain::{BoundedHistory, Metrics, RECENT_PREDICTIONS_CAPACITY};
use sentiment_ops::services::ticker::REQUESTS_PER_HOUR_RANGE;
use sentiment_ops::services::MetricsTicker;
use std::time::Duration;

proptest! {
    #[test]
    fn prop_history_keeps_newest_entries_first(entries in prop::collection::vec(any::<u32>(), 0..40)) {
        let mut history = BoundedHistory::with_capacity(RECENT_PREDICTIONS_CAPACITY);
        for entry in &entries {
            history.push(*entry);
        }

        let expected: Vec<u32> = entries
            .iter()
            .rev()
            .take(RECENT_PREDICTIONS_CAPACITY)
            .copied()
            .collect();
        prop_assert_eq!(history.len(), entries.len().min(RECENT_PREDICTIONS_CAPACITY));
        prop_assert_eq!(history.to_vec(), expected);
    }

    #[test]
    fn prop_history_evicts_exactly_the_oldest(
        capacity in 1usize..10,
        entries in prop::collection::vec(any::<u16>(), 0..40),
    ) {
        let mut history = BoundedHistory::with_capacity(capacity);
        let mut evicted = Vec::new();
        for entry in &entries {
            evicted.extend(history.push(*entry));
        }

        let overflow = entries.len().saturating_sub(capacity);
        prop_assert_eq!(evicted.as_slice(), &entries[..overflow]);
    }

    #[test]
    fn prop_ticker_growth_is_bounded(seed in any::<u64>(), ticks in 0usize..50) {
        let mut ticker = MetricsTicker::seeded(Duration::from_secs(5), seed);
        let mut metrics = Metrics::seed();
        let start = metrics.total_predictions.into_inner();
        let mut previous = start;

        for _ in 0..ticks {
            ticker.tick(&mut metrics);
            let total = metrics.total_predictions.into_inner();
            prop_assert!(total >= previous);
            prop_assert!(total - previous <= 2);
            prop_assert!(REQUESTS_PER_HOUR_RANGE.contains(&metrics.requests_per_hour.into_inner()));
            previous = total;
        }

        prop_assert!(previous - start <= 2 * ticks as u64);
    }
}
