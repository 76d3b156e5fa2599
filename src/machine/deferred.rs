//! Deferred actions.
//!
//! Actions that cannot run right away (typically follow-ups requested from
//! inside a handler or listener, where a direct call would be re-entrant)
//! are queued here and executed when the host drains the queue.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TicketStatus {
    Pending,
    Detached,
    Cancelled,
    Fired,
}

/// Token for an action queued with [`Machine::defer`](crate::machine::Machine::defer).
///
/// Dropping the token before the action fires cancels it. Call
/// [`detach`](Self::detach) to let the action fire without keeping the token.
#[must_use = "dropping a DeferredAction cancels it; call `detach()` to let it fire"]
#[derive(Debug)]
pub struct DeferredAction {
    status: Rc<Cell<TicketStatus>>,
}

impl DeferredAction {
    /// Cancel the action. Has no effect if it already fired.
    pub fn cancel(self) {
        if self.status.get() != TicketStatus::Fired {
            self.status.set(TicketStatus::Cancelled);
        }
    }

    /// Release the token and let the action fire on the next drain.
    pub fn detach(self) {
        if self.status.get() == TicketStatus::Pending {
            self.status.set(TicketStatus::Detached);
        }
    }

    /// Whether the action is still waiting in the queue.
    pub fn is_pending(&self) -> bool {
        self.status.get() == TicketStatus::Pending
    }

    pub fn has_fired(&self) -> bool {
        self.status.get() == TicketStatus::Fired
    }
}

impl Drop for DeferredAction {
    fn drop(&mut self) {
        if self.status.get() == TicketStatus::Pending {
            self.status.set(TicketStatus::Cancelled);
        }
    }
}

pub(crate) struct DeferredEntry<A> {
    pub(crate) action: A,
    due: Instant,
    status: Rc<Cell<TicketStatus>>,
}

impl<A> DeferredEntry<A> {
    pub(crate) fn is_cancelled(&self) -> bool {
        self.status.get() == TicketStatus::Cancelled
    }

    pub(crate) fn mark_fired(&self) {
        self.status.set(TicketStatus::Fired);
    }
}

/// FIFO queue of deferred actions.
pub(crate) struct DeferredQueue<A> {
    entries: VecDeque<DeferredEntry<A>>,
}

impl<A> DeferredQueue<A> {
    pub(crate) fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Queue `action`, first discarding entries whose tokens were cancelled.
    pub(crate) fn push(&mut self, action: A, due: Instant) -> DeferredAction {
        self.entries.retain(|e| !e.is_cancelled());
        let status = Rc::new(Cell::new(TicketStatus::Pending));
        self.entries.push_back(DeferredEntry {
            action,
            due,
            status: Rc::clone(&status),
        });
        DeferredAction { status }
    }

    /// Remove and return every live entry due at `now`, in queue order.
    ///
    /// Cancelled entries are dropped; entries not yet due stay queued.
    pub(crate) fn take_due(&mut self, now: Instant) -> Vec<DeferredEntry<A>> {
        let mut due = Vec::new();
        let mut waiting = VecDeque::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if entry.is_cancelled() {
                continue;
            }
            if entry.due <= now {
                due.push(entry);
            } else {
                waiting.push_back(entry);
            }
        }
        self.entries = waiting;
        due
    }

    /// Number of queued entries that have not been cancelled.
    pub(crate) fn pending(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_cancelled()).count()
    }
}
