use std::time::{Duration, Instant};

/// Lets a periodic log line through at most once per interval.
#[derive(Debug, Clone)]
pub struct LogThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl LogThrottle {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    /// `true` if nothing was logged yet or the interval has passed since the
    /// last `true`.
    pub fn should_log(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_logs() {
        let mut t = LogThrottle::new(Duration::from_secs(5));
        assert!(t.should_log(Instant::now()));
    }

    #[test]
    fn suppresses_within_interval() {
        let start = Instant::now();
        let mut t = LogThrottle::new(Duration::from_secs(5));
        assert!(t.should_log(start));
        assert!(!t.should_log(start + Duration::from_secs(1)));
        assert!(!t.should_log(start + Duration::from_millis(4_999)));
        assert!(t.should_log(start + Duration::from_secs(5)));
        assert!(!t.should_log(start + Duration::from_secs(6)));
    }
}
