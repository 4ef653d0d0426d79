//! Lightweight wall-clock timing for service calls.
//!
//! Services start a [`Timer`] at the top of an operation and log the
//! elapsed milliseconds when it finishes.

use std::time::Instant;

/// A simple timer that measures elapsed time.
#[derive(Debug)]
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Elapsed time in milliseconds without stopping the timer.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1e3
    }

    /// Stop the timer and return elapsed time in milliseconds.
    pub fn stop(self) -> f64 {
        self.elapsed_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_non_negative() {
        let t = Timer::start("noop");
        assert_eq!(t.label(), "noop");
        assert!(t.stop() >= 0.0);
    }
}
