//! Virtual clock and pending timers for one page session.

use std::collections::BTreeMap;

use cleaner_core::Timer;
use cleaner_engine::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerEvent {
    Watcher(Timer),
    FadeNotification(NodeId),
    RemoveNotification(NodeId),
}

/// Timers fire in due-time order; ties keep scheduling order.
#[derive(Debug, Default)]
pub(crate) struct TimerQueue {
    now_ms: u64,
    next_seq: u64,
    pending: BTreeMap<(u64, u64), TimerEvent>,
}

impl TimerQueue {
    pub(crate) fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub(crate) fn schedule(&mut self, delay_ms: u64, event: TimerEvent) {
        let due = self.now_ms.saturating_add(delay_ms);
        self.pending.insert((due, self.next_seq), event);
        self.next_seq += 1;
    }

    /// Pops the earliest timer due at or before `until_ms`, moving the clock to it.
    pub(crate) fn pop_due(&mut self, until_ms: u64) -> Option<TimerEvent> {
        let (&(due, seq), _) = self.pending.first_key_value()?;
        if due > until_ms {
            return None;
        }
        let event = self.pending.remove(&(due, seq))?;
        self.now_ms = self.now_ms.max(due);
        Some(event)
    }

    pub(crate) fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
