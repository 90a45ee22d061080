//! Boundary watch and one-shot deadlines
//!
//! Both are polled from the engine tick. Neither owns a thread or timer;
//! they compare against values the caller passes in.

use std::time::{Duration, Instant};
use tracing::trace;

/// Fires once when playback reaches a trimmed end time
#[derive(Debug, Clone)]
pub struct EndWatch {
    boundary: Option<f64>,
    epsilon: f64,
}

impl EndWatch {
    /// `epsilon` is how many seconds before the boundary the watch fires
    pub fn new(epsilon: f64) -> Self {
        Self {
            boundary: None,
            epsilon: epsilon.max(0.0),
        }
    }

    /// Watch for `boundary` seconds, replacing any previous watch
    pub fn arm(&mut self, boundary: f64) {
        trace!(boundary, "End watch armed");
        self.boundary = Some(boundary);
    }

    pub fn cancel(&mut self) {
        self.boundary = None;
    }

    pub fn is_armed(&self) -> bool {
        self.boundary.is_some()
    }

    pub fn boundary(&self) -> Option<f64> {
        self.boundary
    }

    /// Check the playback position
    ///
    /// Returns `true` exactly once, when `current_time` reaches
    /// `boundary - epsilon`; the watch disarms itself.
    pub fn check(&mut self, current_time: f64) -> bool {
        match self.boundary {
            Some(boundary) if current_time >= boundary - self.epsilon => {
                self.boundary = None;
                true
            }
            _ => false,
        }
    }
}

/// One-shot timer polled against the caller's clock
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `delay` after `now`, replacing any pending deadline
    pub fn start(&mut self, now: Instant, delay: Duration) {
        self.at = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn is_pending(&self) -> bool {
        self.at.is_some()
    }

    /// Returns `true` once when `now` has reached the deadline
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_watch_fires_once_within_epsilon() {
        let mut watch = EndWatch::new(0.3);
        watch.arm(20.0);

        assert!(!watch.check(19.5));
        assert!(watch.check(19.7));
        assert!(!watch.is_armed());
        assert!(!watch.check(25.0));
    }

    #[test]
    fn end_watch_rearm_replaces() {
        let mut watch = EndWatch::new(0.3);
        watch.arm(20.0);
        watch.arm(60.0);
        assert!(!watch.check(30.0));
        assert_eq!(watch.boundary(), Some(60.0));

        watch.cancel();
        assert!(!watch.check(100.0));
    }

    #[test]
    fn deadline_fires_once() {
        let t0 = Instant::now();
        let mut deadline = Deadline::new();
        deadline.start(t0, Duration::from_millis(300));

        assert!(!deadline.poll(t0 + Duration::from_millis(299)));
        assert!(deadline.poll(t0 + Duration::from_millis(300)));
        assert!(!deadline.poll(t0 + Duration::from_secs(5)));
        assert!(!deadline.is_pending());
    }

    #[test]
    fn cancelled_deadline_never_fires() {
        let t0 = Instant::now();
        let mut deadline = Deadline::new();
        deadline.start(t0, Duration::from_millis(10));
        deadline.cancel();
        assert!(!deadline.poll(t0 + Duration::from_secs(1)));
    }
}
