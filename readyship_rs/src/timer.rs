//! Pending timer set.
//!
//! Every component owns one [`PendingTimers`] queue. Scheduling returns a
//! [`TimerId`]; a handle leaves the set when it fires or is cancelled, and
//! teardown cancels whatever is left in one sweep.

use std::collections::{BTreeMap, HashMap};

/// Opaque handle to a scheduled future mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Timer queue ordered by `(deadline, schedule order)`.
///
/// Two timers with the same deadline fire in the order they were scheduled,
/// matching an ordinary event-loop timer queue.
#[derive(Debug)]
pub struct PendingTimers<E> {
    queue: BTreeMap<(u64, u64), E>,
    deadlines: HashMap<u64, u64>,
    next_seq: u64,
}

impl<E> Default for PendingTimers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> PendingTimers<E> {
    pub fn new() -> Self {
        Self {
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `event` to fire `delay_ms` after `now`.
    pub fn schedule(&mut self, now: u64, delay_ms: u64, event: E) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let deadline = now.saturating_add(delay_ms);
        self.queue.insert((deadline, seq), event);
        self.deadlines.insert(seq, deadline);
        TimerId(seq)
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id.0) {
            Some(deadline) => self.queue.remove(&(deadline, id.0)).is_some(),
            None => false,
        }
    }

    /// Drop every pending timer, returning how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.queue.len();
        self.queue.clear();
        self.deadlines.clear();
        cancelled
    }

    /// Remove and return the earliest timer whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(u64, TimerId, E)> {
        let (&(deadline, seq), _) = self.queue.first_key_value()?;
        if deadline > now {
            return None;
        }
        let event = self.queue.remove(&(deadline, seq))?;
        self.deadlines.remove(&seq);
        Some((deadline, TimerId(seq), event))
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.keys().next().map(|&(deadline, _)| deadline)
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id.0)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let mut timers = PendingTimers::new();
        timers.schedule(0, 300, "c");
        timers.schedule(0, 100, "a");
        timers.schedule(50, 50, "b");

        assert_eq!(timers.pop_due(1000).map(|(_, _, e)| e), Some("a"));
        assert_eq!(timers.pop_due(1000).map(|(_, _, e)| e), Some("b"));
        assert_eq!(timers.pop_due(1000).map(|(_, _, e)| e), Some("c"));
        assert!(timers.pop_due(1000).is_none());
    }

    #[test]
    fn pop_due_respects_deadline() {
        let mut timers = PendingTimers::new();
        timers.schedule(0, 500, ());
        assert!(timers.pop_due(499).is_none());
        assert_eq!(timers.next_deadline(), Some(500));
        let (deadline, _, ()) = timers.pop_due(500).expect("due at 500");
        assert_eq!(deadline, 500);
        assert!(timers.is_empty());
    }

    #[test]
    fn cancel_removes_handle_once() {
        let mut timers = PendingTimers::new();
        let keep = timers.schedule(0, 10, 1);
        let drop = timers.schedule(0, 20, 2);

        assert!(timers.cancel(drop));
        assert!(!timers.cancel(drop));
        assert!(timers.contains(keep));
        assert!(!timers.contains(drop));
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn fired_handles_leave_the_set() {
        let mut timers = PendingTimers::new();
        let id = timers.schedule(0, 0, ());
        assert!(timers.contains(id));
        timers.pop_due(0);
        assert!(!timers.contains(id));
        assert!(!timers.cancel(id));
    }

    #[test]
    fn cancel_all_counts_pending() {
        let mut timers = PendingTimers::new();
        for delay in [10, 20, 30] {
            timers.schedule(0, delay, ());
        }
        assert_eq!(timers.cancel_all(), 3);
        assert!(timers.is_empty());
        assert_eq!(timers.next_deadline(), None);
    }
}
