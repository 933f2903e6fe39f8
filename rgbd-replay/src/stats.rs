//! Tracking latency statistics.

use std::fmt;
use std::time::Duration;

/// Median and mean of the recorded tracking durations, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingSummary {
    pub median: f64,
    pub mean: f64,
    pub count: usize,
}

impl fmt::Display for TrackingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "median tracking time: {}", self.median)?;
        write!(f, "mean tracking time: {}", self.mean)
    }
}

/// Append-only collection of per-frame tracking durations.
#[derive(Debug, Clone, Default)]
pub struct TrackingStats {
    samples: Vec<f64>,
}

impl TrackingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, duration: Duration) {
        self.samples.push(duration.as_secs_f64());
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Median and mean over everything recorded so far.
    ///
    /// The median is the element at index `n / 2` of the sorted samples, so an
    /// even count yields the upper of the two middle values. Returns `None`
    /// when nothing has been recorded.
    pub fn finalize(&self) -> Option<TrackingSummary> {
        if self.samples.is_empty() {
            return None;
        }

        let mut sorted = self.samples.clone();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let total: f64 = sorted.iter().sum();

        Some(TrackingSummary {
            median: sorted[count / 2],
            mean: total / count as f64,
            count,
        })
    }
}
