//! Native frame pacing

use std::time::{Duration, Instant};

use super::FramePacer;

/// Sleeps so frames start at a fixed rate, like a game clock's `tick(fps)`
///
/// If a frame overruns, the schedule restarts from now instead of bursting
/// to catch up.
#[derive(Debug)]
pub struct FixedRatePacer {
    period: Duration,
    next: Option<Instant>,
}

impl FixedRatePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            next: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FramePacer for FixedRatePacer {
    fn wait(&mut self) {
        let now = Instant::now();
        let due = match self.next {
            Some(due) if due > now => {
                std::thread::sleep(due - now);
                due
            }
            _ => now,
        };
        self.next = Some(due + self.period);
    }
}
