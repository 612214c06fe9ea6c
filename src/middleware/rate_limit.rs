//! Login throttling middleware
//!
//! Bounds the rate of failed credential attempts on a single connection.

use std::time::{Duration, Instant};

/// Sliding-window throttle over failed login attempts.
///
/// Owned by the connection's handler task, so no keying or locking is
/// needed; each connection gets its own window. Only failures count —
/// a legitimate user who mistypes once is not punished for logging in.
pub struct LoginThrottle {
    failures: Vec<Instant>,
    max_failures: usize,
    window: Duration,
}

impl LoginThrottle {
    pub fn new(max_failures: usize, window: Duration) -> Self {
        Self {
            failures: Vec::new(),
            max_failures,
            window,
        }
    }

    /// Returns whether another attempt is currently allowed.
    pub fn check(&mut self) -> bool {
        let now = Instant::now();
        self.failures
            .retain(|&time| now.duration_since(time) <= self.window);

        self.failures.len() < self.max_failures
    }

    /// Records a failed credential attempt.
    pub fn record_failure(&mut self) {
        self.failures.push(Instant::now());
    }
}
