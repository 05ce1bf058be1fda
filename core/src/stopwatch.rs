use std::time::{Duration, Instant};

/// Wall-clock stopwatch.
/// It can only be created in the running state, so `elapsed()` always has a reference point.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started_at: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
