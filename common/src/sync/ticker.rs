use std::time::{Duration, Instant};

/// Deadlines for a task firing at a fixed interval. A tick which is handled
/// late does not cause a burst of catch-up ticks.
pub struct Ticker {
    expires_at: Instant,
    duration: Duration,
}

impl Ticker {
    /// Creates a new ticker that ticks at the specified duration interval.
    pub fn every(duration: Duration) -> Self {
        Self {
            expires_at: Instant::now() + duration,
            duration,
        }
    }

    /// Time left until the next tick is due, zero if it already is.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }

    /// Consume the current tick and schedule the next one.
    pub fn advance(&mut self, now: Instant) {
        self.expires_at += self.duration;
        if self.expires_at <= now {
            self.expires_at = now + self.duration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_keeps_phase() {
        let mut ticker = Ticker::every(Duration::from_millis(100));
        let first = ticker.expires_at;

        ticker.advance(first);
        assert_eq!(first + Duration::from_millis(100), ticker.expires_at);
    }

    #[test]
    fn test_late_tick_skips_ahead() {
        let mut ticker = Ticker::every(Duration::from_millis(100));
        let late = ticker.expires_at + Duration::from_millis(350);

        ticker.advance(late);
        assert_eq!(late + Duration::from_millis(100), ticker.expires_at);
        assert_eq!(Duration::from_millis(100), ticker.remaining(late));
    }
}
