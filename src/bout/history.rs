//! Bounded undo history of bout snapshots.

use std::collections::VecDeque;

use super::clock::ClockReading;
use super::mark::Side;
use super::outcome::Outcome;

/// Number of snapshots kept per bout. Older ones are dropped first.
pub const HISTORY_DEPTH: usize = 20;

/// Copy of a bout's mutable scoring fields taken just before a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub(crate) red: Side,
    pub(crate) white: Side,
    pub(crate) outcome: Outcome,
    pub(crate) overtime_active: bool,
    /// Set only by operations that rewrite the clock reading.
    pub(crate) clock: Option<ClockReading>,
}

/// FIFO-bounded stack of snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
}

impl History {
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        if self.snapshots.len() == HISTORY_DEPTH {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    pub(crate) fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    pub(crate) fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(penalties: u32) -> Snapshot {
        Snapshot {
            red: Side::from_parts(Vec::new(), penalties).unwrap_or_default(),
            white: Side::default(),
            outcome: Outcome::Pending,
            overtime_active: false,
            clock: None,
        }
    }

    #[test]
    fn test_drops_oldest_past_depth() {
        let mut history = History::default();
        for i in 0..=HISTORY_DEPTH as u32 {
            history.push(snapshot(i));
        }
        assert_eq!(history.len(), HISTORY_DEPTH);

        let mut last = None;
        while let Some(s) = history.pop() {
            last = Some(s);
        }
        // Snapshot 0 was evicted; the oldest survivor is snapshot 1.
        assert_eq!(last.map(|s| s.red.penalties()), Some(1));
    }
}
