//! Presentation event history.
//!
//! [`EventLog`] keeps the most recent events in memory for frontends;
//! [`JsonlEventWriter`] appends every event to a file for later inspection.
mod jsonl;

pub use jsonl::{JsonlEventWriter, read_events};

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tactics_core::{PresentationEvent, Tick};

/// Default number of events kept in memory.
pub const DEFAULT_LOG_CAPACITY: usize = 256;

/// An event stamped with its position in the session history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Monotonic sequence number, starting at 0.
    pub seq: u64,
    /// Engine time at which the event was drained.
    pub at: Tick,
    pub event: PresentationEvent,
}

/// Bounded ring of the latest events. The oldest entry is dropped when full.
#[derive(Clone, Debug)]
pub struct EventLog {
    entries: VecDeque<LoggedEvent>,
    capacity: usize,
    next_seq: u64,
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    /// Records an event and returns its stamped form.
    pub fn push(&mut self, at: Tick, event: PresentationEvent) -> LoggedEvent {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        let entry = LoggedEvent {
            seq: self.next_seq,
            at,
            event,
        };
        self.next_seq += 1;
        self.entries.push_back(entry);
        entry
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LoggedEvent> {
        self.entries.iter()
    }

    /// Events with a sequence number at or after `seq`.
    pub fn since(&self, seq: u64) -> impl Iterator<Item = &LoggedEvent> {
        self.entries.iter().filter(move |entry| entry.seq >= seq)
    }

    pub fn latest(&self) -> Option<&LoggedEvent> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events ever recorded, including those already evicted.
    pub fn total(&self) -> u64 {
        self.next_seq
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::EntityId;

    fn death(id: u32) -> PresentationEvent {
        PresentationEvent::Death {
            actor: EntityId(id),
            killer: None,
        }
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut log = EventLog::with_capacity(2);
        for id in 0..3 {
            log.push(Tick(u64::from(id)), death(id));
        }

        assert_eq!(log.len(), 2);
        assert_eq!(log.total(), 3);
        let seqs: Vec<u64> = log.iter().map(|entry| entry.seq).collect();
        assert_eq!(seqs, vec![1, 2]);
        assert_eq!(log.latest().map(|entry| entry.event), Some(death(2)));
        assert_eq!(log.since(2).count(), 1);
    }

    #[test]
    fn zero_capacity_still_keeps_the_latest() {
        let mut log = EventLog::with_capacity(0);
        log.push(Tick(1), death(7));
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.len(), 1);
    }
}
