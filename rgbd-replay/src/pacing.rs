//! Real-time pacing for sequence replay.
//!
//! Each frame's target gap comes from the recorded timestamps, never from
//! elapsed wall time, so overruns do not accumulate beyond a single frame.
//! Frames are never skipped to catch up.

use std::time::Duration;
use tracing::trace;

/// Seconds to idle after dispatching the frame at `current`.
///
/// The target gap is `next - current` when a next frame exists, otherwise
/// `current - previous` (the last recorded interval), otherwise zero. The
/// result is the target gap minus `processing`, floored at zero.
pub fn compute_idle(
    current: f64,
    next: Option<f64>,
    previous: Option<f64>,
    processing: f64,
) -> f64 {
    let target = match (next, previous) {
        (Some(next), _) => next - current,
        (None, Some(previous)) => current - previous,
        (None, None) => 0.0,
    };

    let idle = target - processing;
    if idle > 0.0 { idle } else { 0.0 }
}

/// Pacing over the timestamps of one manifest.
#[derive(Debug, Clone, Default)]
pub struct Pacer {
    timestamps: Vec<f64>,
}

impl Pacer {
    pub fn new(timestamps: Vec<f64>) -> Self {
        Self { timestamps }
    }

    /// Idle duration after frame `index` took `processing` to track.
    ///
    /// Returns zero for an out-of-range index.
    pub fn idle_after(&self, index: usize, processing: Duration) -> Duration {
        let Some(&current) = self.timestamps.get(index) else {
            return Duration::ZERO;
        };
        let next = self.timestamps.get(index + 1).copied();
        let previous = index.checked_sub(1).and_then(|i| self.timestamps.get(i)).copied();

        let idle = compute_idle(current, next, previous, processing.as_secs_f64());
        trace!(index, idle, "computed idle");

        Duration::try_from_secs_f64(idle).unwrap_or(Duration::ZERO)
    }
}

/// Suspends the replay loop between frames.
pub trait IdleWait {
    fn idle(&mut self, duration: Duration);
}

/// Blocks the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadIdle;

impl IdleWait for ThreadIdle {
    fn idle(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<F: FnMut(Duration)> IdleWait for F {
    fn idle(&mut self, duration: Duration) {
        self(duration)
    }
}
