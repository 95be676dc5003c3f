use crate::state::Tick;

/// Source of logical "now" for the scheduler.
///
/// Real-time hosts map wall-clock milliseconds onto ticks; tests and headless
/// runs drive a [`ManualClock`] so ordering is reproducible.
pub trait Clock {
    fn now(&self) -> Tick;
}

/// Clock that only moves when told to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: Tick,
}

impl ManualClock {
    pub const fn new() -> Self {
        Self { now: Tick::ZERO }
    }

    pub const fn starting_at(now: Tick) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, ticks: u64) {
        self.now = self.now + ticks;
    }

    /// Moves to `at`. Never goes backwards.
    pub fn set(&mut self, at: Tick) {
        self.now = self.now.max(at);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Tick {
        self.now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Tick {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_monotonic() {
        let mut clock = ManualClock::new();
        clock.advance(40);
        assert_eq!(clock.now(), Tick(40));
        clock.set(Tick(10));
        assert_eq!(clock.now(), Tick(40));
        clock.set(Tick(90));
        assert_eq!(clock.now(), Tick(90));
    }
}
