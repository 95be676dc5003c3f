use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use tracing::trace;

use super::clock::Clock;
use crate::error::{ErrorSeverity, TacticsError};
use crate::state::{EntityId, Position, Tick};

/// Consistency violations. Any of these means the caller broke the
/// one-live-entry-per-actor rule, which is a bug rather than a game condition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("actor {0} already holds a live turn entry")]
    AlreadyScheduled(EntityId),

    #[error("turn entry for actor {0} is no longer live")]
    StaleEntry(EntityId),

    #[error("actor {0} has no live turn entry")]
    NotScheduled(EntityId),
}

impl TacticsError for ScheduleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }
}

/// A turn handed out by [`TurnScheduler::next`].
///
/// Deliberately not `Clone`: the entry is the actor's one live turn, and it is
/// consumed by [`TurnScheduler::reschedule`] or [`TurnScheduler::retire`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a popped turn must be rescheduled or retired"]
pub struct TurnEntry {
    actor: EntityId,
    due: Tick,
    seq: u64,
    destination: Option<Position>,
    collision: Option<EntityId>,
}

impl TurnEntry {
    pub fn actor(&self) -> EntityId {
        self.actor
    }

    pub fn due(&self) -> Tick {
        self.due
    }

    /// Cell the actor is moving to this turn, once resolved.
    pub fn destination(&self) -> Option<Position> {
        self.destination
    }

    /// Actor occupying the destination, if the move collided.
    pub fn collision(&self) -> Option<EntityId> {
        self.collision
    }

    pub fn set_destination(&mut self, destination: Position) {
        self.destination = Some(destination);
    }

    pub fn set_collision(&mut self, occupant: EntityId) {
        self.collision = Some(occupant);
    }
}

/// Heap key. Ordered by due time, then insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Queued {
    due: Tick,
    seq: u64,
    actor: EntityId,
}

/// Sign of `lhs - rhs`, computed without overflow.
fn clamped_delta(lhs: u64, rhs: u64) -> i8 {
    (i128::from(lhs) - i128::from(rhs)).clamp(-1, 1) as i8
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        clamped_delta(self.due.0, other.due.0)
            .cmp(&0)
            .then_with(|| clamped_delta(self.seq, other.seq).cmp(&0))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Where an actor's live entry currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Queued { due: Tick, seq: u64 },
    CheckedOut { seq: u64 },
}

/// Due-time ordered queue of actor turns.
///
/// Every scheduled actor owns exactly one live entry: either waiting in the
/// queue or checked out by the caller between [`next`](Self::next) and
/// [`reschedule`](Self::reschedule). Cancelled entries are dropped lazily when
/// they reach the top of the heap.
#[derive(Debug)]
pub struct TurnScheduler<C: Clock> {
    clock: C,
    default_delay: u64,
    heap: BinaryHeap<Reverse<Queued>>,
    live: HashMap<EntityId, Slot>,
    next_seq: u64,
}

impl<C: Clock> TurnScheduler<C> {
    pub fn new(clock: C, default_delay: u64) -> Self {
        Self {
            clock,
            default_delay,
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn default_delay(&self) -> u64 {
        self.default_delay
    }

    /// Number of actors holding a live entry.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn is_scheduled(&self, actor: EntityId) -> bool {
        self.live.contains_key(&actor)
    }

    /// Due time of a queued entry. `None` when unscheduled or checked out.
    pub fn due_of(&self, actor: EntityId) -> Option<Tick> {
        match self.live.get(&actor)? {
            Slot::Queued { due, .. } => Some(*due),
            Slot::CheckedOut { .. } => None,
        }
    }

    /// Queues `actor` at `now + delay`.
    pub fn schedule(&mut self, actor: EntityId, delay: u64) -> Result<Tick, ScheduleError> {
        if self.live.contains_key(&actor) {
            return Err(ScheduleError::AlreadyScheduled(actor));
        }
        Ok(self.push(actor, delay))
    }

    /// Queues `actor` after the default delay.
    pub fn schedule_default(&mut self, actor: EntityId) -> Result<Tick, ScheduleError> {
        self.schedule(actor, self.default_delay)
    }

    /// Removes and returns the entry with the smallest due time, due or not.
    pub fn next(&mut self) -> Option<TurnEntry> {
        let queued = self.pop_live()?;
        Some(self.check_out(queued))
    }

    /// Like [`next`](Self::next) but only when the earliest entry is due.
    pub fn next_due(&mut self) -> Option<TurnEntry> {
        let (_, due) = self.peek()?;
        if due > self.clock.now() {
            return None;
        }
        self.next()
    }

    /// Earliest live entry without removing it.
    pub fn peek(&mut self) -> Option<(EntityId, Tick)> {
        self.prune();
        self.heap
            .peek()
            .map(|Reverse(queued)| (queued.actor, queued.due))
    }

    /// Ticks until the earliest entry is due; `Some(0)` when one is overdue.
    pub fn time_until_next(&mut self) -> Option<u64> {
        let (_, due) = self.peek()?;
        Some(self.clock.now().until(due))
    }

    /// Consumes a checked-out entry and installs its replacement at `now + delay`.
    pub fn reschedule(&mut self, entry: TurnEntry, delay: u64) -> Result<Tick, ScheduleError> {
        self.release(&entry)?;
        Ok(self.push(entry.actor, delay))
    }

    /// Consumes a checked-out entry without replacing it. Used when the actor
    /// leaves play.
    pub fn retire(&mut self, entry: TurnEntry) -> Result<(), ScheduleError> {
        self.release(&entry)
    }

    /// Drops whatever live entry `actor` holds. Returns false if it had none.
    pub fn cancel(&mut self, actor: EntityId) -> bool {
        self.live.remove(&actor).is_some()
    }

    fn push(&mut self, actor: EntityId, delay: u64) -> Tick {
        let due = self.clock.now() + delay;
        let seq = self.next_seq;
        self.next_seq += 1;

        self.live.insert(actor, Slot::Queued { due, seq });
        self.heap.push(Reverse(Queued { due, seq, actor }));
        trace!(actor = %actor, due = %due, "turn scheduled");
        due
    }

    fn release(&mut self, entry: &TurnEntry) -> Result<(), ScheduleError> {
        match self.live.get(&entry.actor) {
            Some(Slot::CheckedOut { seq }) if *seq == entry.seq => {
                self.live.remove(&entry.actor);
                Ok(())
            }
            Some(_) => Err(ScheduleError::StaleEntry(entry.actor)),
            None => Err(ScheduleError::NotScheduled(entry.actor)),
        }
    }

    fn check_out(&mut self, queued: Queued) -> TurnEntry {
        self.live
            .insert(queued.actor, Slot::CheckedOut { seq: queued.seq });
        TurnEntry {
            actor: queued.actor,
            due: queued.due,
            seq: queued.seq,
            destination: None,
            collision: None,
        }
    }

    fn is_current(&self, queued: &Queued) -> bool {
        matches!(
            self.live.get(&queued.actor),
            Some(Slot::Queued { seq, .. }) if *seq == queued.seq
        )
    }

    fn pop_live(&mut self) -> Option<Queued> {
        while let Some(Reverse(queued)) = self.heap.pop() {
            if self.is_current(&queued) {
                return Some(queued);
            }
        }
        None
    }

    fn prune(&mut self) {
        while let Some(Reverse(queued)) = self.heap.peek() {
            if self.is_current(queued) {
                break;
            }
            self.heap.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualClock;

    fn scheduler() -> TurnScheduler<ManualClock> {
        TurnScheduler::new(ManualClock::new(), 1000)
    }

    #[test]
    fn due_is_now_plus_delay() {
        let mut turns = scheduler();
        turns.clock_mut().advance(250);
        let due = turns.schedule(EntityId(1), 40).unwrap();
        assert_eq!(due, Tick(290));
        assert_eq!(turns.due_of(EntityId(1)), Some(Tick(290)));
    }

    #[test]
    fn default_delay_applies_when_unspecified() {
        let mut turns = scheduler();
        assert_eq!(turns.schedule_default(EntityId(1)).unwrap(), Tick(1000));
    }

    #[test]
    fn next_returns_globally_smallest_due() {
        let mut turns = scheduler();
        for (id, delay) in [(1, 300), (2, 100), (3, 200), (4, 100)] {
            turns.schedule(EntityId(id), delay).unwrap();
        }

        let order: Vec<_> = std::iter::from_fn(|| {
            let entry = turns.next()?;
            let actor = entry.actor();
            turns.retire(entry).unwrap();
            Some(actor)
        })
        .collect();

        assert_eq!(order, vec![EntityId(2), EntityId(4), EntityId(3), EntityId(1)]);
    }

    #[test]
    fn next_does_not_wait_for_due_time() {
        let mut turns = scheduler();
        turns.schedule(EntityId(1), 500).unwrap();
        assert_eq!(turns.time_until_next(), Some(500));
        assert!(turns.next_due().is_none());

        let entry = turns.next().unwrap();
        assert_eq!(entry.due(), Tick(500));
        turns.retire(entry).unwrap();
    }

    #[test]
    fn next_due_waits_for_clock() {
        let mut turns = scheduler();
        turns.schedule(EntityId(7), 100).unwrap();
        turns.clock_mut().advance(99);
        assert!(turns.next_due().is_none());
        turns.clock_mut().advance(1);
        let entry = turns.next_due().unwrap();
        assert_eq!(entry.actor(), EntityId(7));
        turns.retire(entry).unwrap();
    }

    #[test]
    fn one_live_entry_per_actor() {
        let mut turns = scheduler();
        turns.schedule(EntityId(1), 10).unwrap();
        assert_eq!(
            turns.schedule(EntityId(1), 20),
            Err(ScheduleError::AlreadyScheduled(EntityId(1)))
        );

        let entry = turns.next().unwrap();
        assert!(turns.is_scheduled(EntityId(1)), "checked out is still live");
        assert_eq!(
            turns.schedule(EntityId(1), 20),
            Err(ScheduleError::AlreadyScheduled(EntityId(1)))
        );

        turns.clock_mut().advance(10);
        assert_eq!(turns.reschedule(entry, 5).unwrap(), Tick(15));
        assert_eq!(turns.len(), 1);
    }

    #[test]
    fn cancelled_entries_are_skipped() {
        let mut turns = scheduler();
        turns.schedule(EntityId(1), 10).unwrap();
        turns.schedule(EntityId(2), 20).unwrap();
        assert!(turns.cancel(EntityId(1)));

        assert_eq!(turns.peek(), Some((EntityId(2), Tick(20))));
        let entry = turns.next().unwrap();
        assert_eq!(entry.actor(), EntityId(2));
        turns.retire(entry).unwrap();
        assert!(turns.next().is_none());
    }

    #[test]
    fn entry_from_before_cancel_is_stale() {
        let mut turns = scheduler();
        turns.schedule(EntityId(3), 10).unwrap();
        let entry = turns.next().unwrap();
        turns.cancel(EntityId(3));
        turns.schedule(EntityId(3), 50).unwrap();

        assert_eq!(
            turns.reschedule(entry, 5),
            Err(ScheduleError::StaleEntry(EntityId(3)))
        );
    }

    #[test]
    fn retire_without_live_entry_is_reported() {
        let mut turns = scheduler();
        turns.schedule(EntityId(3), 10).unwrap();
        let entry = turns.next().unwrap();
        turns.cancel(EntityId(3));
        let err = turns.retire(entry).unwrap_err();
        assert_eq!(err, ScheduleError::NotScheduled(EntityId(3)));
        assert!(err.severity().is_internal());
    }

    #[test]
    fn extreme_due_times_order_without_overflow() {
        let mut turns = scheduler();
        turns.schedule(EntityId(1), u64::MAX).unwrap();
        turns.schedule(EntityId(2), 0).unwrap();
        let entry = turns.next().unwrap();
        assert_eq!(entry.actor(), EntityId(2));
        turns.retire(entry).unwrap();
        assert_eq!(turns.time_until_next(), Some(u64::MAX));
    }

    #[test]
    fn entry_records_resolution() {
        let mut turns = scheduler();
        turns.schedule(EntityId(1), 0).unwrap();
        let mut entry = turns.next().unwrap();
        entry.set_destination(Position::new(2, 3));
        entry.set_collision(EntityId(9));
        assert_eq!(entry.destination(), Some(Position::new(2, 3)));
        assert_eq!(entry.collision(), Some(EntityId(9)));
        turns.reschedule(entry, 10).unwrap();
    }
}
