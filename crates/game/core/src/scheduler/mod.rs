//! Turn scheduling on an injected logical clock.
//!
//! The scheduler never sleeps. Hosts ask [`TurnScheduler::time_until_next`]
//! each frame and decide whether to wait or run a tick.

mod clock;
mod delay;
mod queue;

pub use clock::{Clock, ManualClock};
pub use delay::{speed_from_agility, turn_delay};
pub use queue::{ScheduleError, TurnEntry, TurnScheduler};
