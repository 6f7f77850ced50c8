//! Run statistics of the produce loop.

use std::fmt;
use std::time::Duration;

/// Why the produce loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopReason {
    /// `max_events` events were published.
    #[default]
    LimitReached,
    /// A shutdown signal arrived.
    Interrupted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::LimitReached => f.write_str("event limit reached"),
            StopReason::Interrupted => f.write_str("interrupted"),
        }
    }
}

/// Metrics from one run of the produce loop.
#[derive(Debug, Clone, Default)]
pub struct ProduceMetrics {
    /// Number of events acknowledged by the sink.
    pub events_published: u64,
    /// Number of publish attempts that failed.
    pub publish_failures: u64,
    /// Total time spent in the loop.
    pub total_duration: Duration,
    pub stop_reason: StopReason,
}

impl ProduceMetrics {
    /// Calculate published events per second.
    pub fn events_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.events_published as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}
