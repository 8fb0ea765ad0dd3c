use std::time::Duration;
use sysmatrix_core::MetricType;

/// Tracks which metric is on the matrix and rotates through them on a timer.
#[derive(Debug, Clone)]
pub struct MetricSelector {
    current: MetricType,
    rotate_every: Option<Duration>,
    elapsed: Duration,
}

impl MetricSelector {
    /// `rotate_secs == 0` keeps `initial` on screen forever.
    pub fn new(initial: MetricType, rotate_secs: u64) -> Self {
        Self {
            current: initial,
            rotate_every: rotation(rotate_secs),
            elapsed: Duration::ZERO,
        }
    }

    pub fn current(&self) -> MetricType {
        self.current
    }

    /// Jump to `metric` and restart the rotation timer.
    pub fn set(&mut self, metric: MetricType) {
        self.current = metric;
        self.elapsed = Duration::ZERO;
    }

    pub fn set_rotation(&mut self, rotate_secs: u64) {
        self.rotate_every = rotation(rotate_secs);
        self.elapsed = Duration::ZERO;
    }

    /// Advance the timer; returns `true` when the metric changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(every) = self.rotate_every else {
            return false;
        };
        self.elapsed += dt;
        if self.elapsed < every {
            return false;
        }
        self.elapsed -= every;
        self.current = self.current.next();
        true
    }
}

fn rotation(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
