//! Wall-clock time source for real-time frontends.
use std::time::{Duration, Instant};

use tactics_core::{Clock, Tick};

/// Ticks are milliseconds elapsed since the clock was created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Tick {
        Tick(u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX))
    }
}
